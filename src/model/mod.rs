//! Structural Models
//!
//! Absence-safe navigation over schema-less API objects. Objects are
//! `serde_json::Value` trees; navigation yields a `Node`, and a missing key is
//! `Node::Missing` rather than an error. Lists support positional access and an
//! existential subset matcher.

pub mod list;
pub mod matching;
pub mod node;
pub mod objects;

pub use list::ListView;
pub use node::{Model, ModelView, Node};
pub use objects::flatten_objects;
