pub mod document;

pub use document::{Document, ExternalDocs, Info, License};

use crate::error::DocumentError;

/// Parse a Swagger 2.0 document from JSON text.
pub fn from_json(input: &str) -> Result<Document, DocumentError> {
    let root: serde_json::Value = serde_json::from_str(input)?;
    Document::from_value(root)
}
