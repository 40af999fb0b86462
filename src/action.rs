//! Action Records
//!
//! An `Action` captures one invocation of the CLI: verb, arguments, exit status
//! and captured output. An `ActionResult` aggregates the actions that make up a
//! higher-level operation and is also the result tracker carried by tracking
//! scopes.

use crate::error::ClientError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One executed (or emulated) CLI invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub verb: String,
    pub args: Vec<String>,
    pub status: i32,
    pub out: String,
    pub err: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// True when the action was refused because an enclosing deadline expired.
    #[serde(default)]
    pub timed_out: bool,
    /// Named inputs the action referenced (e.g. a definition file and its content).
    #[serde(default)]
    pub references: BTreeMap<String, String>,
}

impl Action {
    pub fn new(verb: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            verb: verb.into(),
            args,
            status: 0,
            out: String::new(),
            err: String::new(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            timed_out: false,
            references: BTreeMap::new(),
        }
    }

    pub fn with_reference(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.references.insert(name.into(), content.into());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.status == 0
    }
}

/// Aggregate of the actions performed for one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub operation: String,
    pub actions: Vec<Action>,
}

impl ActionResult {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            actions: Vec::new(),
        }
    }

    /// Append an action. Order is the order of registration.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Status of the most recent failing action, or 0 when every action succeeded.
    pub fn status(&self) -> i32 {
        self.actions
            .iter()
            .rev()
            .map(|a| a.status)
            .find(|s| *s != 0)
            .unwrap_or(0)
    }

    /// Concatenated stdout of all actions.
    pub fn out(&self) -> String {
        self.actions
            .iter()
            .map(|a| a.out.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Concatenated stderr of all actions.
    pub fn err(&self) -> String {
        self.actions
            .iter()
            .map(|a| a.err.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Turn a non-zero aggregate status into a `CommandFailed` error.
    pub fn fail_if(&self, msg: &str) -> Result<(), ClientError> {
        let status = self.status();
        if status == 0 {
            return Ok(());
        }
        Err(ClientError::CommandFailed {
            operation: format!("{} ({})", msg, self.operation),
            status,
            err: self.err(),
        })
    }
}
