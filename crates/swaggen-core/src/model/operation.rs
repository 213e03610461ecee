use indexmap::IndexMap;
use serde_json::Value;

use super::parameter::Parameters;
use super::Ident;

/// HTTP methods recognized on a Swagger 2.0 path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// The lowercase path-item key for this method.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "patch" => Some(Self::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared response of an operation. The resolved schema is carried as
/// the raw fragment; typed response capture is deliberately deferred.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status key as declared, including grouped forms like `default`.
    pub status: String,
    pub description: Option<String>,
    pub source: Value,
}

/// A fully assembled operation. Owns its parameters and responses; immutable
/// after construction.
#[derive(Debug, Clone)]
pub struct Operation {
    pub method: HttpMethod,
    /// The path string this operation belongs to.
    pub path: String,
    pub id: Ident,
    pub description: Option<String>,
    pub deprecated: bool,
    pub parameters: Parameters,
    pub responses: Vec<Response>,
}

/// One `paths` entry: shared routing data plus the operations that survived
/// assembly, keyed by method.
#[derive(Debug, Clone)]
pub struct PathItem {
    pub path: String,
    pub base_path: String,
    pub host: Option<String>,
    /// Shared parameters inherited by every operation on this path.
    pub parameters: Parameters,
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl PathItem {
    /// The full route for this path: host + basePath + path.
    pub fn route(&self) -> String {
        let host = self.host.as_deref().unwrap_or("");
        let base = self.base_path.trim_end_matches('/');
        format!("{host}{base}{path}", path = self.path)
    }
}
