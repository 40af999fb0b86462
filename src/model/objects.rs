//! Object definitions: normalize the shapes callers hand in into a flat list
//! of single API objects.

use super::node::kind_name;
use crate::error::ModelError;
use serde_json::Value;

/// Flatten an object definition into individual objects.
///
/// Accepts a single object, a `kind: List` object (its `items` are returned),
/// an array of either, or JSON or multi-line YAML text of any of those.
pub fn flatten_objects(definition: Value) -> Result<Vec<Value>, ModelError> {
    let mut objects = Vec::new();
    flatten_into(definition, &mut objects)?;
    Ok(objects)
}

fn flatten_into(definition: Value, out: &mut Vec<Value>) -> Result<(), ModelError> {
    match definition {
        Value::Object(mut map) => {
            if map.get("kind").and_then(Value::as_str) == Some("List") {
                match map.remove("items") {
                    Some(Value::Array(items)) => out.extend(items),
                    Some(Value::Null) | None => {}
                    Some(other) => {
                        return Err(ModelError::UnsupportedDefinition(format!(
                            "List items must be an array, got {}",
                            kind_name(&other)
                        )))
                    }
                }
            } else {
                out.push(Value::Object(map));
            }
            Ok(())
        }
        Value::Array(entries) => {
            for entry in entries {
                flatten_into(entry, out)?;
            }
            Ok(())
        }
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                flatten_into(serde_json::from_str(trimmed)?, out)
            } else if trimmed.contains('\n') {
                let decoded: Value = serde_yaml::from_str(trimmed)?;
                flatten_into(decoded, out)
            } else {
                Err(ModelError::UnsupportedDefinition(format!(
                    "text is neither JSON nor multi-line YAML: {}",
                    trimmed
                )))
            }
        }
        other => Err(ModelError::UnsupportedDefinition(
            kind_name(&other).to_string(),
        )),
    }
}
