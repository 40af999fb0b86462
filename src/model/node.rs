//! Owned models, borrowed views and navigation results.

use super::list::ListView;
use crate::error::ModelError;
use serde_json::{Map, Value};

/// Result of navigating one step into a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// Key not present. Further navigation stays `Missing`.
    Missing,
    Map(ModelView<'a>),
    List(ListView<'a>),
    /// Leaf value, including explicit `null`.
    Scalar(&'a Value),
}

impl<'a> Node<'a> {
    /// Wrap a borrowed value: objects become views, arrays become list views.
    pub fn wrap(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Node::Map(ModelView::new(map)),
            Value::Array(items) => Node::List(ListView::new(items)),
            scalar => Node::Scalar(scalar),
        }
    }

    /// Navigate to `key`. Anything other than a map yields `Missing`.
    pub fn get(&self, key: &str) -> Node<'a> {
        match self {
            Node::Map(view) => view.get(key),
            Node::Missing | Node::List(_) | Node::Scalar(_) => Node::Missing,
        }
    }

    /// Navigate a sequence of keys.
    pub fn path(&self, keys: &[&str]) -> Node<'a> {
        keys.iter().fold(*self, |node, key| node.get(key))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing)
    }

    /// Present and explicitly `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Value::Null))
    }

    /// Owned copy of the value behind this node; `None` when missing.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Node::Missing => None,
            Node::Map(view) => Some(Value::Object(view.map().clone())),
            Node::List(list) => Some(Value::Array(list.items().to_vec())),
            Node::Scalar(value) => Some((*value).clone()),
        }
    }

    pub fn as_map(&self) -> Option<ModelView<'a>> {
        match self {
            Node::Map(view) => Some(*view),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<ListView<'a>> {
        match self {
            Node::List(list) => Some(*list),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Node::Scalar(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Scalar(value) => value.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(value) => value.as_bool(),
            _ => None,
        }
    }
}

impl PartialEq<Value> for Node<'_> {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Node::Map(view), Value::Object(map)) => view.map() == map,
            (Node::List(list), Value::Array(items)) => list.items() == items.as_slice(),
            (Node::Scalar(value), other) => *value == other,
            _ => false,
        }
    }
}

/// Borrowed view over a JSON object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelView<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> ModelView<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        ModelView { map }
    }

    pub fn get(&self, key: &str) -> Node<'a> {
        self.map.get(key).map(Node::wrap).unwrap_or(Node::Missing)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a String> {
        self.map.keys()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn map(&self) -> &'a Map<String, Value> {
        self.map
    }
}

/// Owned top-level model over a JSON object.
///
/// The model owns its map; `set` writes the raw value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    map: Map<String, Value>,
}

impl Model {
    /// Empty model. Every key is missing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Model { map }
    }

    /// Take ownership of a JSON object.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Ok(Model { map }),
            other => Err(ModelError::NotAnObject(kind_name(&other).to_string())),
        }
    }

    /// Decode JSON text holding a single object.
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn view(&self) -> ModelView<'_> {
        ModelView::new(&self.map)
    }

    pub fn get(&self, key: &str) -> Node<'_> {
        self.view().get(key)
    }

    pub fn path(&self, keys: &[&str]) -> Node<'_> {
        Node::Map(self.view()).path(keys)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.map.insert(key.into(), value.into());
    }

    /// Store `value` at a nested path, writing into the nested map in place.
    ///
    /// Missing intermediate keys get empty objects. An intermediate value that
    /// is present but not an object is left untouched and reported.
    pub fn set_path(&mut self, keys: &[&str], value: impl Into<Value>) -> Result<(), ModelError> {
        let (last, parents) = keys.split_last().ok_or(ModelError::EmptyPath)?;
        let mut map = &mut self.map;
        for key in parents {
            let slot = map
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            map = match slot {
                Value::Object(nested) => nested,
                other => {
                    return Err(ModelError::PathBlocked {
                        key: key.to_string(),
                        found: kind_name(other),
                    })
                }
            };
        }
        map.insert(last.to_string(), value.into());
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key)
    }

    /// `"<kind>/<name>"` with the kind lowercased, when both are strings.
    pub fn qualified_name(&self) -> Option<String> {
        let kind = self.get("kind").as_str()?;
        let name = self.path(&["metadata", "name"]).as_str()?;
        Some(format!("{}/{}", kind.to_lowercase(), name))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

impl From<Map<String, Value>> for Model {
    fn from(map: Map<String, Value>) -> Self {
        Model::from_map(map)
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
