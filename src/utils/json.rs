//! JSON pointer helpers used when editing config values in place.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Set `new_value` at an RFC 6901 pointer, creating intermediate objects.
///
/// An empty pointer replaces the whole document. Arrays are only indexed,
/// never grown.
pub fn set_json_pointer(root: &mut Value, pointer: &str, new_value: Value) -> Result<()> {
    if pointer.is_empty() {
        *root = new_value;
        return Ok(());
    }

    if pointer == "/" || !pointer.starts_with('/') {
        return Err(Error::validation_invalid_argument(
            "pointer",
            format!("JSON pointer must start with '/' and name a key: {}", pointer),
            None,
            None,
        ));
    }

    let tokens: Vec<String> = pointer.split('/').skip(1).map(unescape_token).collect();
    let Some((last, parents)) = tokens.split_last() else {
        *root = new_value;
        return Ok(());
    };

    let mut current = root;
    for token in parents {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(token.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(arr) => {
                let index = parse_array_index(token)?;
                let len = arr.len();
                arr.get_mut(index).ok_or_else(|| {
                    Error::config_invalid_value(
                        pointer,
                        Some(len.to_string()),
                        "Array index out of bounds while creating path",
                    )
                })?
            }
            other => {
                return Err(Error::config_invalid_value(
                    pointer,
                    Some(value_type_name(other).to_string()),
                    "Expected object/array at pointer",
                ))
            }
        };
    }

    if current.is_null() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => {
            map.insert(last.clone(), new_value);
            Ok(())
        }
        Value::Array(arr) => {
            let index = parse_array_index(last)?;
            let slot = arr.get_mut(index).ok_or_else(|| {
                Error::config_invalid_value(
                    "arrayIndex",
                    Some(index.to_string()),
                    "Array index out of bounds",
                )
            })?;
            *slot = new_value;
            Ok(())
        }
        other => Err(Error::config_invalid_value(
            "jsonPointer",
            Some(value_type_name(other).to_string()),
            "Cannot set child on non-container",
        )),
    }
}

fn parse_array_index(token: &str) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        Error::validation_invalid_argument(
            "arrayIndex",
            "Invalid array index token",
            Some(token.to_string()),
            None,
        )
    })
}

fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sets_existing_nested_key() {
        let mut doc = json!({ "defaults": { "history": { "capacity": 10 } } });
        set_json_pointer(&mut doc, "/defaults/history/capacity", json!(25)).unwrap();
        assert_eq!(doc["defaults"]["history"]["capacity"], 25);
    }

    #[test]
    fn creates_missing_objects() {
        let mut doc = json!({});
        set_json_pointer(&mut doc, "/defaults/catalog/path", json!("~/cat.json")).unwrap();
        assert_eq!(doc["defaults"]["catalog"]["path"], "~/cat.json");
    }

    #[test]
    fn replaces_null_parent() {
        let mut doc = json!({ "defaults": { "catalog": null } });
        set_json_pointer(&mut doc, "/defaults/catalog/path", json!("x.json")).unwrap();
        assert_eq!(doc["defaults"]["catalog"]["path"], "x.json");
    }

    #[test]
    fn unescapes_tokens() {
        let mut doc = json!({});
        set_json_pointer(&mut doc, "/a~1b/c~0d", json!(1)).unwrap();
        assert_eq!(doc["a/b"]["c~d"], 1);
    }

    #[test]
    fn rejects_relative_pointer() {
        let mut doc = json!({});
        let err = set_json_pointer(&mut doc, "defaults", json!(1)).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn rejects_scalar_parent() {
        let mut doc = json!({ "defaults": 3 });
        let err = set_json_pointer(&mut doc, "/defaults/history", json!(1)).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn array_index_out_of_bounds_fails() {
        let mut doc = json!({ "items": [1, 2] });
        assert!(set_json_pointer(&mut doc, "/items/5", json!(0)).is_err());
        set_json_pointer(&mut doc, "/items/1", json!(9)).unwrap();
        assert_eq!(doc["items"][1], 9);
    }
}
