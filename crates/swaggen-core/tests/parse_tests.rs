use serde_json::json;

use swaggen_core::error::DocumentError;
use swaggen_core::parse::{self, Document};

const PETSTORE: &str = include_str!("fixtures/petstore-2.0.json");

#[test]
fn parse_petstore_json() {
    let document = parse::from_json(PETSTORE).expect("should parse petstore");

    let info = document.info.as_ref().expect("should have info");
    assert_eq!(info.title, "Petstore");
    assert_eq!(info.version, "1.0.6");
    assert_eq!(
        info.terms_of_service.as_deref(),
        Some("http://example.com/terms/")
    );
    let license = info.license.as_ref().expect("should have license");
    assert_eq!(license.name, "Apache 2.0");

    let docs = document.external_docs.as_ref().expect("externalDocs");
    assert_eq!(docs.url.as_deref(), Some("http://example.com/docs"));

    assert_eq!(document.host.as_deref(), Some("petstore.example.com"));
    assert_eq!(document.base_path, "/v1");
    assert!(document.has_paths());
}

#[test]
fn paths_keep_document_order() {
    let document = parse::from_json(PETSTORE).unwrap();
    let keys: Vec<&str> = document.paths().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        ["/pets", "/pets/{petId}", "x-internal", "relative/pets"]
    );
}

#[test]
fn version_must_be_2_0() {
    let result = Document::from_value(json!({
        "swagger": "3.0.0",
        "info": { "title": "Test", "version": "1.0" },
        "paths": {}
    }));
    assert!(matches!(result, Err(DocumentError::UnsupportedVersion(v)) if v == "3.0.0"));
}

#[test]
fn missing_version_is_fatal() {
    let result = Document::from_value(json!({
        "info": { "title": "Test", "version": "1.0" },
        "paths": {}
    }));
    assert!(matches!(result, Err(DocumentError::MissingField("swagger"))));
}

#[test]
fn root_must_be_an_object() {
    assert!(matches!(
        Document::from_value(json!([1, 2, 3])),
        Err(DocumentError::NotAnObject)
    ));
}

#[test]
fn unparsable_json_is_fatal() {
    assert!(matches!(
        parse::from_json("{not json"),
        Err(DocumentError::Json(_))
    ));
}

#[test]
fn base_path_defaults_to_slash() {
    let document = Document::from_value(json!({
        "swagger": "2.0",
        "paths": {}
    }))
    .unwrap();
    assert_eq!(document.base_path, "/");
    assert!(document.host.is_none());
    assert!(document.info.is_none());
    assert!(!document.has_paths());
}
