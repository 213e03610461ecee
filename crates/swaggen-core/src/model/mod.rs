pub mod operation;
pub mod parameter;

use std::fmt;

/// API metadata copied onto the model for emitters.
#[derive(Debug, Clone, Default)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// The finished, validated model of one generation pass: every surviving
/// path item in document order. Consumed immutably by emission backends.
#[derive(Debug, Clone)]
pub struct ApiModel {
    pub info: ApiInfo,
    pub host: Option<String>,
    pub base_path: String,
    pub paths: Vec<operation::PathItem>,
}

impl ApiModel {
    pub fn operations(&self) -> impl Iterator<Item = &operation::Operation> {
        self.paths.iter().flat_map(|item| item.operations.values())
    }
}

/// A sanitized identifier with casing variants pre-computed for emitters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The sanitized form, as produced by the sanitizer.
    pub text: String,
    pub pascal_case: String,
    pub snake_case: String,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// Re-export model types for convenience
pub use operation::{HttpMethod, Operation, PathItem, Response};
pub use parameter::{Kind, Parameter, ParameterLocation, Parameters};
