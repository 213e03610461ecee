use serde::Deserialize;
use serde_json::Value;

use crate::error::DocumentError;

/// Info object describing the API. Documentation-only: none of these fields
/// affect the assembled model.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,

    pub version: String,

    pub description: Option<String>,

    #[serde(rename = "termsOfService")]
    pub terms_of_service: Option<String>,

    pub license: Option<License>,
}

/// License information.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: String,
    pub url: Option<String>,
}

/// External documentation link.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ExternalDocs {
    pub description: Option<String>,
    pub url: Option<String>,
}

/// A validated Swagger 2.0 document: the raw value tree plus the typed
/// documentation fields read off the root.
///
/// The raw root is kept because reference resolution is document-relative;
/// it is handed explicitly to every resolution call rather than held as
/// ambient state anywhere else.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    pub info: Option<Info>,
    pub external_docs: Option<ExternalDocs>,
    pub host: Option<String>,
    pub base_path: String,
}

impl Document {
    /// Validate the root value and build the document handle.
    ///
    /// Only structural problems are fatal: a non-object root, a missing
    /// `swagger` field, or a version other than `"2.0"`.
    pub fn from_value(root: Value) -> Result<Self, DocumentError> {
        let object = root.as_object().ok_or(DocumentError::NotAnObject)?;

        let version = object
            .get("swagger")
            .and_then(Value::as_str)
            .ok_or(DocumentError::MissingField("swagger"))?;
        if version != "2.0" {
            return Err(DocumentError::UnsupportedVersion(version.to_string()));
        }

        let info = object
            .get("info")
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()?;
        let external_docs = object
            .get("externalDocs")
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()?;

        let host = object
            .get("host")
            .and_then(Value::as_str)
            .map(str::to_string);
        let base_path = object
            .get("basePath")
            .and_then(Value::as_str)
            .unwrap_or("/")
            .to_string();

        Ok(Self {
            root,
            info,
            external_docs,
            host,
            base_path,
        })
    }

    /// The raw document root, for reference resolution.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `paths` entries in document-declared order. Empty when the
    /// document has no `paths` object.
    pub fn paths(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
    }

    pub fn has_paths(&self) -> bool {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .is_some_and(|paths| !paths.is_empty())
    }
}
