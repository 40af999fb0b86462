//! Scope: one nested unit of execution context.

use crate::action::ActionResult;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Non-owning handle to a scope held by a `ContextStack`.
///
/// Handles are stack positions. A handle stays valid while its scope is open;
/// a scope's parent is always below it, so parent handles of open scopes are
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeHandle(pub(crate) usize);

impl ScopeHandle {
    pub const ROOT: ScopeHandle = ScopeHandle(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Execution context fields. Unset fields defer to enclosing scopes.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub(crate) parent: Option<ScopeHandle>,
    pub cluster: Option<String>,
    pub project: Option<String>,
    pub token: Option<String>,
    pub loglevel: Option<u8>,
    pub deadline: Option<DateTime<Utc>>,
    pub(crate) changes: Option<Vec<String>>,
    pub(crate) result: Option<ActionResult>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cluster(name: impl Into<String>) -> Self {
        Self::new().with_cluster(name)
    }

    pub fn project(name: impl Into<String>) -> Self {
        Self::new().with_project(name)
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self::new().with_token(token)
    }

    pub fn loglevel(level: u8) -> Self {
        Self::new().with_loglevel(level)
    }

    /// Scope whose deadline is `timeout` from now. `None` sets no deadline.
    pub fn timeout(timeout: Option<Duration>) -> Self {
        Self::new().with_timeout(timeout)
    }

    /// Scope that records every change and action registered beneath it.
    pub fn tracker() -> Self {
        Self::new().with_tracking()
    }

    pub fn with_cluster(mut self, name: impl Into<String>) -> Self {
        self.cluster = Some(name.into());
        self
    }

    pub fn with_project(mut self, name: impl Into<String>) -> Self {
        self.project = Some(name.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_loglevel(mut self, level: u8) -> Self {
        self.loglevel = Some(level);
        self
    }

    /// A duration too large to represent leaves the scope without a deadline.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.deadline = timeout
            .and_then(|t| TimeDelta::from_std(t).ok())
            .and_then(|delta| Utc::now().checked_add_signed(delta));
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_tracking(mut self) -> Self {
        self.changes = Some(Vec::new());
        self.result = Some(ActionResult::new("tracker"));
        self
    }

    /// Scope that was on top of the stack when this one was entered.
    pub fn parent(&self) -> Option<ScopeHandle> {
        self.parent
    }

    /// Changes recorded by this scope, if it tracks changes.
    pub fn changes(&self) -> Option<&[String]> {
        self.changes.as_deref()
    }

    /// Actions recorded by this scope, if it tracks results.
    pub fn result(&self) -> Option<&ActionResult> {
        self.result.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.changes.is_some() || self.result.is_some()
    }

    pub(crate) fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        matches!(self.deadline, Some(deadline) if now > deadline)
    }
}
