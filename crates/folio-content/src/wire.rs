//! Wire-shape handling
//!
//! Two backend API generations deliver the same entity differently:
//!
//! ```text
//! Flat:     { "id": 1, "title": "Dusk", "image": { "url": "/uploads/d.png" } }
//! Wrapped:  { "id": 1, "attributes": { "title": "Dusk",
//!             "image": { "data": { "id": 9, "attributes": { "url": "/uploads/d.png" } } } } }
//! ```
//!
//! Both shapes are classified into [`WireEntity`] at the client boundary and
//! collapsed into one flat JSON object before any typed decoding happens.

use crate::error::{ContentError, Result};
use serde_json::{Map, Value};

/// Fields that hold relations or media and may be wrapped in `data`.
pub const RELATION_FIELDS: &[&str] = &["category", "image", "poster", "gallery", "portrait"];

/// One raw entity as delivered by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum WireEntity {
    /// Fields directly on the entity object
    Flat(Map<String, Value>),
    /// Fields nested under `attributes`, id alongside
    Wrapped {
        id: Option<Value>,
        attributes: Map<String, Value>,
    },
}

impl WireEntity {
    /// Classify a raw JSON value by its wire shape.
    pub fn classify(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut map) => match map.remove("attributes") {
                Some(Value::Object(attributes)) => Ok(Self::Wrapped {
                    id: map.remove("id"),
                    attributes,
                }),
                Some(other) => {
                    // `attributes` that is not an object is just a field
                    map.insert("attributes".to_string(), other);
                    Ok(Self::Flat(map))
                }
                None => Ok(Self::Flat(map)),
            },
            other => Err(ContentError::InvalidEntity(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Whether this entity arrived `attributes`-wrapped.
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped { .. })
    }

    /// Top-level fields with the wrapper removed.
    ///
    /// Relations are left untouched; see [`flatten_entity`].
    pub fn into_canonical(self) -> Map<String, Value> {
        match self {
            Self::Flat(map) => map,
            Self::Wrapped { id, mut attributes } => {
                if let Some(id) = id {
                    attributes.insert("id".to_string(), id);
                }
                attributes
            }
        }
    }

    /// Collapse this entity, relations included, into one flat object.
    pub fn flatten(self) -> Value {
        let mut map = self.into_canonical();
        for field in RELATION_FIELDS {
            if let Some(raw) = map.remove(*field) {
                if let Some(value) = unwrap_relation(raw) {
                    map.insert((*field).to_string(), value);
                }
            }
        }
        Value::Object(map)
    }
}

/// Classify and flatten one raw entity.
pub fn flatten_entity(value: Value) -> Result<Value> {
    Ok(WireEntity::classify(value)?.flatten())
}

/// Unwrap one relation value.
///
/// A direct value is preferred. Otherwise `data` is descended: a single
/// object becomes the flattened target, an array maps the same rule over
/// every element. `null` (or `{ "data": null }`) means no relation.
pub fn unwrap_relation(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => Some(Value::Array(
            items.into_iter().filter_map(unwrap_relation).collect(),
        )),
        Value::Object(mut map) if map.contains_key("data") && !map.contains_key("url") => {
            match map.remove("data") {
                Some(Value::Null) | None => None,
                Some(Value::Array(items)) => Some(Value::Array(
                    items.into_iter().filter_map(unwrap_relation).collect(),
                )),
                Some(inner) => unwrap_relation(inner),
            }
        }
        Value::Object(map) => Some(WireEntity::classify(Value::Object(map)).map_or_else(
            |_| Value::Null,
            WireEntity::flatten,
        )),
        other => Some(other),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
