// src/process/shape.rs

use serde_json::{Map, Value};

/// Array fields that wrap the record list, in lookup order.
const WRAPPER_KEYS: &[&str] = &["data", "parkingLots"];

/// The response shapes the endpoint has been seen to return.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{"data": [...]}` or `{"parkingLots": [...]}`.
    Wrapped { key: &'static str, items: Vec<Value> },
    /// An object without a usable wrapper array, taken as one record.
    Single(Map<String, Value>),
    /// A bare top-level array.
    List(Vec<Value>),
    /// A top-level scalar or null.
    Unrecognized(&'static str),
}

impl Payload {
    /// The first wrapper key holding a non-empty array wins; an empty wrapper
    /// array still counts as an (empty) list rather than a single record.
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Object(mut obj) => {
                let non_empty = WRAPPER_KEYS.iter().copied().find(|k| {
                    matches!(obj.get(*k), Some(Value::Array(items)) if !items.is_empty())
                });
                if let Some(key) = non_empty {
                    if let Some(Value::Array(items)) = obj.remove(key) {
                        return Payload::Wrapped { key, items };
                    }
                }

                let empty = WRAPPER_KEYS
                    .iter()
                    .copied()
                    .find(|k| matches!(obj.get(*k), Some(Value::Array(_))));
                match empty {
                    Some(key) => Payload::Wrapped {
                        key,
                        items: Vec::new(),
                    },
                    None => Payload::Single(obj),
                }
            }
            Value::Array(items) => Payload::List(items),
            Value::Null => Payload::Unrecognized("null"),
            Value::Bool(_) => Payload::Unrecognized("bool"),
            Value::Number(_) => Payload::Unrecognized("number"),
            Value::String(_) => Payload::Unrecognized("string"),
        }
    }

    /// Items as JSON values, before any record filtering.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Payload::Wrapped { items, .. } | Payload::List(items) => items,
            Payload::Single(obj) => vec![Value::Object(obj)],
            Payload::Unrecognized(_) => Vec::new(),
        }
    }
}
