use thiserror::Error;

use crate::model::ParameterLocation;

/// Fatal errors: the whole generation pass is aborted.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root is not a JSON object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}

/// Reference resolution failures.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("cyclic reference detected: {0}")]
    CyclicReference(String),
}

/// Path template parse failures.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unbalanced braces in path template `{0}`")]
    Unbalanced(String),

    #[error("empty variable name in path template `{0}`")]
    EmptyVariable(String),

    #[error("path template `{0}` contains no variables")]
    NoVariables(String),

    #[error("adjacent variables in path template `{0}` cannot be disambiguated")]
    AdjacentVariables(String),
}

/// Failures constructing or inserting a single parameter. Per the
/// all-or-nothing policy these abort the owning operation.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter object is not a JSON object")]
    NotAnObject,

    #[error("parameter object has no `name`")]
    MissingName,

    #[error("parameter `{0}` has no `in` location")]
    MissingLocation(String),

    #[error("parameter `{name}` has unknown location `{location}`")]
    UnknownLocation { name: String, location: String },

    #[error("parameter name `{0}` cannot be converted to an identifier")]
    UnusableName(String),

    #[error(
        "parameter `{incoming}` in {incoming_location} collides with `{existing}` in \
         {existing_location}: both sanitize to `{ident}`"
    )]
    IdentifierClash {
        incoming: String,
        incoming_location: ParameterLocation,
        existing: String,
        existing_location: ParameterLocation,
        ident: String,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Failures that abort a single operation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("operation fragment is not a JSON object")]
    NotAnObject,

    #[error("operation has no operationId and an empty path; it cannot be named")]
    Unnameable,

    #[error("path parameter `{name}` does not appear in path template `{path}`")]
    PathParameterNotInTemplate { name: String, path: String },

    #[error("type of parameter `{0}` cannot be inferred")]
    UntypedParameter(String),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Failures that abort a whole path item.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path item `{0}` is not a JSON object")]
    NotAnObject(String),

    #[error("shared parameters of `{path}` are unusable: {source}")]
    BadSharedParameters {
        path: String,
        source: ParameterError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
