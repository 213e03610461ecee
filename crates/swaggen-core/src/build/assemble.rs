//! Assembly of the binding model: one depth-first pass over `paths`, then
//! over the declared methods of each path.
//!
//! Failure containment: a bad parameter or operation drops only the
//! smallest enclosing unit with a diagnostic; only a structurally invalid
//! document aborts the pass (and that is surfaced by the parse layer before
//! this module runs).

use indexmap::IndexMap;
use serde_json::Value;

use super::ident::to_ident;
use super::resolve::{dereference, follow_indirections, infer_kind};
use crate::diag::{DiagnosticSink, Severity};
use crate::error::{OperationError, ParameterError, PathError};
use crate::model::{
    ApiInfo, ApiModel, HttpMethod, Operation, Parameter, ParameterLocation, Parameters, PathItem,
    Response,
};
use crate::parse::Document;
use crate::template::PathTemplate;

/// Build the full model for a validated document. Paths and, within a path,
/// methods are processed in document-declared order; units that fail are
/// dropped with a diagnostic and the pass continues.
pub fn build_model(document: &Document, sink: &dyn DiagnosticSink) -> ApiModel {
    let root = document.root();

    if !document.has_paths() {
        sink.report(
            Severity::Hint,
            "document declares no paths; the model will be empty".to_string(),
        );
    }

    let mut paths = Vec::new();
    for (path, item_value) in document.paths() {
        if path.starts_with("x-") {
            continue;
        }
        if !path.starts_with('/') {
            sink.report(
                Severity::Warning,
                format!("skipping path `{path}`: key does not start with `/`"),
            );
            continue;
        }
        match build_path_item(root, path, item_value, document, sink) {
            Ok(item) => paths.push(item),
            Err(err) => sink.report(Severity::Error, format!("dropping path `{path}`: {err}")),
        }
    }

    let info = document
        .info
        .as_ref()
        .map(|info| ApiInfo {
            title: info.title.clone(),
            version: info.version.clone(),
            description: info.description.clone(),
        })
        .unwrap_or_default();

    ApiModel {
        info,
        host: document.host.clone(),
        base_path: document.base_path.clone(),
        paths,
    }
}

fn build_path_item(
    root: &Value,
    path: &str,
    value: &Value,
    document: &Document,
    sink: &dyn DiagnosticSink,
) -> Result<PathItem, PathError> {
    let item = dereference(root, value)?;
    let object = item
        .as_object()
        .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;

    // Shared parameters, inherited by every operation on the path. A
    // malformed entry poisons the whole path item.
    let mut shared = Parameters::new();
    if let Some(entries) = object.get("parameters").and_then(Value::as_array) {
        for entry in entries {
            let parameter = parse_parameter(root, entry, sink).map_err(|source| {
                PathError::BadSharedParameters {
                    path: path.to_string(),
                    source,
                }
            })?;
            merge_parameter(&mut shared, parameter, sink);
        }
    }

    let mut operations = IndexMap::new();
    for (key, op_value) in object {
        let Some(method) = HttpMethod::from_key(key) else {
            continue;
        };
        match build_operation(root, method, path, op_value, &shared, sink) {
            Ok(operation) => {
                operations.insert(method, operation);
            }
            Err(err) => sink.report(
                Severity::Error,
                format!("dropping operation {method} {path}: {err}"),
            ),
        }
    }

    Ok(PathItem {
        path: path.to_string(),
        base_path: document.base_path.clone(),
        host: document.host.clone(),
        parameters: shared,
        operations,
    })
}

fn build_operation(
    root: &Value,
    method: HttpMethod,
    path: &str,
    value: &Value,
    shared: &Parameters,
    sink: &dyn DiagnosticSink,
) -> Result<Operation, OperationError> {
    let fragment = dereference(root, value)?;
    let object = fragment.as_object().ok_or(OperationError::NotAnObject)?;

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let deprecated = object
        .get("deprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let declared = object
        .get("operationId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty());
    let id = match declared.and_then(to_ident) {
        Some(id) => id,
        None => {
            if path.is_empty() {
                return Err(OperationError::Unnameable);
            }
            let fallback =
                to_ident(&format!("{method} {path}")).ok_or(OperationError::Unnameable)?;
            sink.report(
                Severity::Warning,
                format!(
                    "operation {method} {path} has no usable operationId; using `{fallback}`"
                ),
            );
            fallback
        }
    };

    // Inherited parameters first, then the operation's own. Re-declaring the
    // same (location, name) is an override; a same-identifier clash is
    // logged and the later write wins.
    let mut parameters = Parameters::new();
    for parameter in shared.iter() {
        merge_parameter(&mut parameters, parameter.clone(), sink);
    }
    if let Some(entries) = object.get("parameters").and_then(Value::as_array) {
        for entry in entries {
            let parameter = parse_parameter(root, entry, sink)?;
            merge_parameter(&mut parameters, parameter, sink);
        }
    }

    // Every path-location parameter must name a variable of the path.
    let variables: Vec<String> = PathTemplate::parse(path)
        .map(|template| template.variables().map(str::to_string).collect())
        .unwrap_or_default();
    for parameter in parameters.in_location(ParameterLocation::Path) {
        if !variables.iter().any(|v| *v == parameter.name) {
            return Err(OperationError::PathParameterNotInTemplate {
                name: parameter.name.clone(),
                path: path.to_string(),
            });
        }
    }

    // All-or-nothing: one untyped parameter drops the whole operation.
    if let Some(parameter) = parameters.iter().find(|p| p.kind.is_none()) {
        return Err(OperationError::UntypedParameter(parameter.name.clone()));
    }

    let mut responses = Vec::new();
    if let Some(entries) = object.get("responses").and_then(Value::as_object) {
        for (status, entry) in entries {
            match build_response(root, status, entry) {
                Ok(response) => responses.push(response),
                Err(err) => sink.report(
                    Severity::Warning,
                    format!("skipping response {status} of {method} {path}: {err}"),
                ),
            }
        }
    }

    Ok(Operation {
        method,
        path: path.to_string(),
        id,
        description,
        deprecated,
        parameters,
        responses,
    })
}

/// Construct a parameter from one `parameters` array entry, following
/// indirections for both the entry and its schema source.
fn parse_parameter(
    root: &Value,
    value: &Value,
    sink: &dyn DiagnosticSink,
) -> Result<Parameter, ParameterError> {
    let entry = dereference(root, value)?;
    let object = entry.as_object().ok_or(ParameterError::NotAnObject)?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or(ParameterError::MissingName)?
        .to_string();
    let location = object
        .get("in")
        .and_then(Value::as_str)
        .ok_or_else(|| ParameterError::MissingLocation(name.clone()))?;
    let location =
        ParameterLocation::parse(location).ok_or_else(|| ParameterError::UnknownLocation {
            name: name.clone(),
            location: location.to_string(),
        })?;

    let required = object
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let ident = to_ident(&name).ok_or_else(|| ParameterError::UnusableName(name.clone()))?;

    let source = follow_indirections(root, entry)?.clone();
    let kind = infer_kind(root, &source)?;

    // A default whose JSON kind contradicts the inferred kind is dropped
    // rather than emitted incorrectly.
    let mut default = object.get("default").cloned();
    if let (Some(kind), Some(value)) = (kind, default.as_ref()) {
        if !kind.admits(value) {
            sink.report(
                Severity::Warning,
                format!(
                    "default value for parameter `{name}` does not match inferred kind \
                     `{kind}`; ignoring it"
                ),
            );
            default = None;
        }
    }

    Ok(Parameter {
        name,
        location,
        required,
        default,
        description,
        source,
        kind,
        ident,
    })
}

/// Insert through `safe_add`; on a clash, log it and let the later write
/// win.
fn merge_parameter(parameters: &mut Parameters, parameter: Parameter, sink: &dyn DiagnosticSink) {
    if let Err(clash) = parameters.safe_add(parameter.clone()) {
        sink.report(Severity::Error, clash.to_string());
        parameters.insert(parameter);
    }
}

fn build_response(root: &Value, status: &str, value: &Value) -> Result<Response, OperationError> {
    let entry = dereference(root, value)?;
    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let source = follow_indirections(root, entry)?.clone();
    Ok(Response {
        status: status.to_string(),
        description,
        source,
    })
}
