//! Document-relative `$ref` resolution and schema kind inference.
//!
//! The root value is threaded through every call; nothing here holds
//! document state of its own.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ResolveError;
use crate::model::Kind;

/// Resolve a single `$ref` hop on `node` against `root`.
///
/// `Ok(None)` means `node` carries no indirection and should be used as-is.
/// References follow the document-relative JSON-pointer convention, e.g.
/// `#/definitions/Pet`.
pub fn resolve_reference<'a>(
    root: &'a Value,
    node: &Value,
) -> Result<Option<&'a Value>, ResolveError> {
    let Some(reference) = node.get("$ref") else {
        return Ok(None);
    };
    let reference = reference
        .as_str()
        .ok_or_else(|| ResolveError::InvalidRefFormat(reference.to_string()))?;
    let pointer = reference
        .strip_prefix('#')
        .ok_or_else(|| ResolveError::InvalidRefFormat(reference.to_string()))?;
    root.pointer(pointer)
        .map(Some)
        .ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))
}

/// Follow a chain of `$ref` hops until a non-reference fragment is reached.
/// A repeated reference is a cycle and fails rather than looping.
pub fn dereference<'a>(root: &'a Value, node: &'a Value) -> Result<&'a Value, ResolveError> {
    let mut current = node;
    let mut visited: HashSet<&str> = HashSet::new();
    while let Some(target) = resolve_reference(root, current)? {
        // resolve_reference only returns Some when `$ref` held a string.
        let reference = current
            .get("$ref")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !visited.insert(reference) {
            return Err(ResolveError::CyclicReference(reference.to_string()));
        }
        current = target;
    }
    Ok(current)
}

/// Unwrap `$ref` and nested `schema` indirections one level at a time until
/// a concrete fragment remains. This yields the "source" shape of a
/// parameter or response.
pub fn follow_indirections<'a>(
    root: &'a Value,
    node: &'a Value,
) -> Result<&'a Value, ResolveError> {
    let mut current = node;
    let mut visited: HashSet<String> = HashSet::new();
    loop {
        if let Some(target) = resolve_reference(root, current)? {
            let reference = current
                .get("$ref")
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !visited.insert(reference.to_string()) {
                return Err(ResolveError::CyclicReference(reference.to_string()));
            }
            current = target;
        } else if let Some(inner) = current.get("schema") {
            current = inner;
        } else {
            return Ok(current);
        }
    }
}

/// Infer the semantic kind of a schema fragment, following indirections
/// first. `Ok(None)` means no usable `type` was declared.
pub fn infer_kind(root: &Value, fragment: &Value) -> Result<Option<Kind>, ResolveError> {
    let resolved = follow_indirections(root, fragment)?;
    Ok(resolved
        .get("type")
        .and_then(Value::as_str)
        .and_then(Kind::from_type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_fragments_resolve_to_none() {
        let root = json!({"definitions": {}});
        let node = json!({"type": "string"});
        assert!(resolve_reference(&root, &node).unwrap().is_none());
    }

    #[test]
    fn references_resolve_against_the_root() {
        let root = json!({"definitions": {"Pet": {"type": "object"}}});
        let node = json!({"$ref": "#/definitions/Pet"});
        let target = resolve_reference(&root, &node).unwrap().unwrap();
        assert_eq!(target, &json!({"type": "object"}));
    }

    #[test]
    fn missing_targets_fail() {
        let root = json!({"definitions": {}});
        let node = json!({"$ref": "#/definitions/Pet"});
        assert!(matches!(
            resolve_reference(&root, &node),
            Err(ResolveError::RefTargetNotFound(_))
        ));
    }

    #[test]
    fn non_local_references_fail() {
        let root = json!({});
        let node = json!({"$ref": "other.json#/definitions/Pet"});
        assert!(matches!(
            resolve_reference(&root, &node),
            Err(ResolveError::InvalidRefFormat(_))
        ));
    }

    #[test]
    fn reference_cycles_are_detected() {
        let root = json!({
            "definitions": {
                "A": {"$ref": "#/definitions/B"},
                "B": {"$ref": "#/definitions/A"}
            }
        });
        let node = json!({"$ref": "#/definitions/A"});
        assert!(matches!(
            dereference(&root, &node),
            Err(ResolveError::CyclicReference(_))
        ));
        assert!(matches!(
            follow_indirections(&root, &node),
            Err(ResolveError::CyclicReference(_))
        ));
    }

    #[test]
    fn schema_keys_unwrap_one_level_at_a_time() {
        let root = json!({
            "definitions": {"Pet": {"type": "object"}}
        });
        let node = json!({"name": "pet", "schema": {"$ref": "#/definitions/Pet"}});
        let resolved = follow_indirections(&root, &node).unwrap();
        assert_eq!(resolved, &json!({"type": "object"}));
    }

    #[test]
    fn kinds_follow_indirections() {
        let root = json!({
            "definitions": {"Count": {"type": "integer"}}
        });
        let fragment = json!({"schema": {"$ref": "#/definitions/Count"}});
        assert_eq!(infer_kind(&root, &fragment).unwrap(), Some(Kind::Integer));

        let untyped = json!({"description": "no type here"});
        assert_eq!(infer_kind(&root, &untyped).unwrap(), None);

        let unknown = json!({"type": "file"});
        assert_eq!(infer_kind(&root, &unknown).unwrap(), None);
    }
}
