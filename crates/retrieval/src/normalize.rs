//! Result normalizer.
//!
//! Backend responses carry document payloads in the protobuf `Struct`
//! JSON encoding, where every value may be wrapped in a `kind` object
//! (`stringValue`, `numberValue`, `structValue`, `listValue`, ...).
//! Normalization recursively strips those wrappers into a tagged-variant
//! value type so no backend-native shape survives at any depth. The walk
//! is total, non-mutating, and terminates on any finite nesting.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The backend-agnostic representation of one result record.
pub type NormalizedRecord = BTreeMap<String, NormalizedValue>;

/// A normalized value: scalar leaf, record, or ordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<NormalizedValue>),
    Record(NormalizedRecord),
}

/// Recursively normalize a raw backend value.
///
/// Wrapper objects are unwrapped, plain maps become records, arrays
/// become lists, and scalars pass through unchanged.
pub fn normalize(raw: &Value) -> NormalizedValue {
    match raw {
        Value::Null => NormalizedValue::Null,
        Value::Bool(b) => NormalizedValue::Bool(*b),
        Value::Number(n) => NormalizedValue::Number(n.clone()),
        Value::String(s) => NormalizedValue::Text(s.clone()),
        Value::Array(items) => NormalizedValue::List(items.iter().map(normalize).collect()),
        Value::Object(map) => {
            if let Some(unwrapped) = unwrap_kind(map) {
                return unwrapped;
            }
            NormalizedValue::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), normalize(v)))
                    .collect(),
            )
        }
    }
}

/// Unwrap a protobuf `Value` kind object, if this map is one.
///
/// A kind object has exactly one key naming the payload type. Anything
/// else is treated as an ordinary record.
fn unwrap_kind(map: &Map<String, Value>) -> Option<NormalizedValue> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;

    match (key.as_str(), value) {
        ("nullValue", _) => Some(NormalizedValue::Null),
        ("boolValue", Value::Bool(b)) => Some(NormalizedValue::Bool(*b)),
        ("numberValue", Value::Number(n)) => Some(NormalizedValue::Number(n.clone())),
        ("stringValue", Value::String(s)) => Some(NormalizedValue::Text(s.clone())),
        ("structValue", Value::Object(inner)) => {
            // structValue nests its map under "fields"
            let fields = match inner.get("fields") {
                Some(Value::Object(f)) if inner.len() == 1 => f,
                _ => inner,
            };
            Some(NormalizedValue::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), normalize(v)))
                    .collect(),
            ))
        }
        ("listValue", Value::Object(inner)) => {
            let values = match inner.get("values") {
                Some(Value::Array(items)) => items.as_slice(),
                None if inner.is_empty() => &[],
                _ => return None,
            };
            Some(NormalizedValue::List(values.iter().map(normalize).collect()))
        }
        ("listValue", Value::Array(items)) => {
            Some(NormalizedValue::List(items.iter().map(normalize).collect()))
        }
        _ => None,
    }
}

impl NormalizedValue {
    /// Borrow as a record, when this value is one.
    pub fn as_record(&self) -> Option<&NormalizedRecord> {
        match self {
            Self::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Consume into a record, when this value is one.
    pub fn into_record(self) -> Option<NormalizedRecord> {
        match self {
            Self::Record(map) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(normalize(&json!(null)), NormalizedValue::Null);
        assert_eq!(normalize(&json!(true)), NormalizedValue::Bool(true));
        assert_eq!(
            normalize(&json!("hello")),
            NormalizedValue::Text("hello".to_string())
        );
        assert_eq!(
            normalize(&json!(4.5)),
            NormalizedValue::Number(serde_json::Number::from_f64(4.5).unwrap())
        );
    }

    #[test]
    fn test_plain_object_becomes_record() {
        let normalized = normalize(&json!({"title": "Trail Shoes", "price": 79.99}));
        let record = normalized.as_record().unwrap();
        assert_eq!(
            record.get("title"),
            Some(&NormalizedValue::Text("Trail Shoes".to_string()))
        );
    }

    #[test]
    fn test_wrapped_scalars_unwrap() {
        assert_eq!(
            normalize(&json!({"stringValue": "B08L6ZW124"})),
            NormalizedValue::Text("B08L6ZW124".to_string())
        );
        assert_eq!(
            normalize(&json!({"numberValue": 4.0})),
            NormalizedValue::Number(serde_json::Number::from_f64(4.0).unwrap())
        );
        assert_eq!(
            normalize(&json!({"boolValue": false})),
            NormalizedValue::Bool(false)
        );
        assert_eq!(normalize(&json!({"nullValue": null})), NormalizedValue::Null);
    }

    #[test]
    fn test_nested_struct_and_list_unwrap() {
        let raw = json!({
            "structValue": {
                "fields": {
                    "title": {"stringValue": "Trail Shoes"},
                    "tags": {"listValue": {"values": [
                        {"stringValue": "outdoor"},
                        {"stringValue": "running"}
                    ]}},
                    "details": {"structValue": {"fields": {
                        "price": {"numberValue": 79.99}
                    }}}
                }
            }
        });

        let record = normalize(&raw).into_record().unwrap();
        assert_eq!(
            record.get("title"),
            Some(&NormalizedValue::Text("Trail Shoes".to_string()))
        );
        assert_eq!(
            record.get("tags"),
            Some(&NormalizedValue::List(vec![
                NormalizedValue::Text("outdoor".to_string()),
                NormalizedValue::Text("running".to_string()),
            ]))
        );

        let details = record.get("details").and_then(|v| v.as_record()).unwrap();
        assert_eq!(
            details.get("price"),
            Some(&NormalizedValue::Number(
                serde_json::Number::from_f64(79.99).unwrap()
            ))
        );
    }

    #[test]
    fn test_no_wrappers_survive_serialization() {
        let raw = json!({
            "structValue": {"fields": {
                "nested": {"listValue": {"values": [{"structValue": {"fields": {
                    "deep": {"stringValue": "leaf"}
                }}}]}}
            }}
        });

        let serialized = serde_json::to_string(&normalize(&raw)).unwrap();
        assert!(!serialized.contains("structValue"));
        assert!(!serialized.contains("listValue"));
        assert!(!serialized.contains("stringValue"));
        assert!(serialized.contains("leaf"));
    }

    #[test]
    fn test_empty_list_value() {
        assert_eq!(
            normalize(&json!({"listValue": {}})),
            NormalizedValue::List(Vec::new())
        );
    }

    #[test]
    fn test_multi_key_object_is_not_a_wrapper() {
        // Looks wrapper-ish but has two keys, so it is an ordinary record
        let raw = json!({"stringValue": "x", "other": 1});
        assert!(normalize(&raw).as_record().is_some());
    }

    #[test]
    fn test_plain_arrays_recurse() {
        let raw = json!([{"stringValue": "a"}, "b", 3]);
        assert_eq!(
            normalize(&raw),
            NormalizedValue::List(vec![
                NormalizedValue::Text("a".to_string()),
                NormalizedValue::Text("b".to_string()),
                NormalizedValue::Number(3.into()),
            ])
        );
    }
}
