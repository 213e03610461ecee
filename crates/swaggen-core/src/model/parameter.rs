use std::collections::HashMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use super::Ident;
use crate::error::ParameterError;

/// Where an HTTP request carries a parameter. Mirrors the Swagger 2.0 `in`
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Body,
    Header,
    Path,
    FormData,
}

impl ParameterLocation {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "query" => Some(Self::Query),
            "body" => Some(Self::Body),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "formData" => Some(Self::FormData),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::Header => "header",
            Self::Path => "path",
            Self::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The inferred semantic JSON type of a schema fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Map a declared `type` keyword to a kind. Unrecognized values yield
    /// `None`, which downstream treats as an inference failure.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// The kind of a concrete JSON value.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether a concrete value is acceptable for this kind. `Number`
    /// admits integer-valued JSON; everything else is exact.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, Kind::of_value(value)) {
            (Kind::Number, Kind::Integer) => true,
            (expected, actual) => *expected == actual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single operation parameter. Constructed once during assembly, immutable
/// thereafter; identity for deduplication is `(location, name)`.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Raw name, as declared in the document.
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    /// Declared default, kept only when its JSON kind matches `kind`.
    pub default: Option<Value>,
    pub description: Option<String>,
    /// The resolved schema fragment defining the parameter's shape.
    pub source: Value,
    /// Inferred semantic type; `None` signals inference failure.
    pub kind: Option<Kind>,
    pub ident: Ident,
}

impl Parameter {
    /// Identity equality: same location and same raw name.
    pub fn is_same(&self, other: &Parameter) -> bool {
        self.location == other.location && self.name == other.name
    }
}

/// An insertion-ordered parameter collection keyed by `(location, name)`.
///
/// Alongside the primary storage it tracks sanitized identifier → location
/// for collision detection, and the set of locations in use.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    items: IndexMap<(ParameterLocation, String), Parameter>,
    idents: HashMap<String, ParameterLocation>,
    locations: IndexSet<ParameterLocation>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.items.values()
    }

    pub fn get(&self, location: ParameterLocation, name: &str) -> Option<&Parameter> {
        self.items.get(&(location, name.to_string()))
    }

    /// Every stored parameter whose sanitized identifier equals the
    /// candidate's, excluding one that is identity-equal (an intentional
    /// override, not a clash).
    pub fn name_clashes(&self, candidate: &Parameter) -> Vec<&Parameter> {
        if !self.idents.contains_key(&candidate.ident.text) {
            return Vec::new();
        }
        self.items
            .values()
            .filter(|existing| {
                existing.ident.text == candidate.ident.text && !existing.is_same(candidate)
            })
            .collect()
    }

    /// Insert unless the parameter's identifier collides with a distinct
    /// existing parameter. On a clash the collection is left untouched and
    /// the error names both sides.
    pub fn safe_add(&mut self, parameter: Parameter) -> Result<(), ParameterError> {
        if let Some(existing) = self.name_clashes(&parameter).first() {
            return Err(ParameterError::IdentifierClash {
                incoming: parameter.name.clone(),
                incoming_location: parameter.location,
                existing: existing.name.clone(),
                existing_location: existing.location,
                ident: parameter.ident.text.clone(),
            });
        }
        self.insert(parameter);
        Ok(())
    }

    /// Unconditional insert: replaces an identity-equal parameter and is the
    /// last-write-wins path after a logged clash.
    pub fn insert(&mut self, parameter: Parameter) {
        self.idents
            .insert(parameter.ident.text.clone(), parameter.location);
        self.locations.insert(parameter.location);
        self.items
            .insert((parameter.location, parameter.name.clone()), parameter);
    }

    /// Parameters in a single location, in insertion order.
    pub fn in_location(
        &self,
        location: ParameterLocation,
    ) -> impl Iterator<Item = &Parameter> {
        self.items
            .values()
            .filter(move |p| p.location == location)
    }

    /// Locations actually in use, in first-use order.
    pub fn locations(&self) -> impl Iterator<Item = ParameterLocation> + '_ {
        self.locations.iter().copied()
    }

    /// Required parameters first, then optional, insertion order preserved
    /// within each group. This is the call-signature order emitters use.
    pub fn ordered(&self) -> Vec<&Parameter> {
        let mut out: Vec<&Parameter> = self.items.values().filter(|p| p.required).collect();
        out.extend(self.items.values().filter(|p| !p.required));
        out
    }
}
