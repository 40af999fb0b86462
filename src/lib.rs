//! oc-client: Scoped Context and Structural Access for the `oc` CLI
//!
//! Core of a client library that drives a cluster-management command-line tool.
//! Provides a per-thread stack of nested execution scopes (cluster, project,
//! token, log level, deadline, change and result tracking) and absence-safe
//! navigation and subset matching over schema-less API objects.

pub mod action;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod model;
pub mod runner;

pub use action::{Action, ActionResult};
pub use context::{ContextStack, Scope, ScopeGuard, ScopeHandle};
pub use error::{ClientError, ModelError};
pub use model::{ListView, Model, ModelView, Node};
pub use runner::{CommandOutput, CommandRunner, ResolvedContext};
