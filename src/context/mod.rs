//! Execution Context
//!
//! Nested scopes decide which cluster, project, token, log level and deadline
//! apply to an operation, and collect change names and action results across
//! every enclosing tracking scope.
//!
//! `ContextStack` is an explicit, arena-backed stack usable on its own. The
//! `current` module layers a per-thread stack and an RAII guard on top of it.

pub mod current;
pub mod defaults;
pub mod scope;
pub mod stack;

pub use current::ScopeGuard;
pub use defaults::{
    defaults, install_defaults, reset_defaults, set_default_cluster, set_default_loglevel,
    set_default_project, set_default_token, Defaults,
};
pub use scope::{Scope, ScopeHandle};
pub use stack::{Ancestors, ContextStack, ResolvedContext};
