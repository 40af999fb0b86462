//! Context Stack
//!
//! Arena-backed stack of open scopes. Parent links are stack positions, so the
//! ancestor chain of any open scope is a walk down the vector.

use super::defaults;
use super::scope::{Scope, ScopeHandle};
use crate::action::Action;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{trace, warn};

/// The four context values an invocation runs with, resolved at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContext {
    pub cluster: Option<String>,
    pub project: Option<String>,
    pub token: Option<String>,
    pub loglevel: Option<u8>,
}

/// Stack of nested scopes. Never empty: index 0 is the root scope.
#[derive(Debug, Clone)]
pub struct ContextStack {
    scopes: Vec<Scope>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    pub fn new() -> Self {
        ContextStack {
            scopes: vec![Scope::new()],
        }
    }

    /// Number of open scopes, root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push `scope`, recording the current top as its parent.
    pub fn enter(&mut self, mut scope: Scope) -> ScopeHandle {
        scope.parent = Some(self.current_handle());
        self.scopes.push(scope);
        let handle = self.current_handle();
        trace!(depth = handle.index(), "Entered scope");
        handle
    }

    /// Pop the most recently entered scope and hand it back with its trackers.
    ///
    /// Callers pair every `enter` with one `exit` in reverse order. The root
    /// scope is never popped.
    pub fn exit(&mut self) -> Option<Scope> {
        if self.scopes.len() <= 1 {
            warn!("Exit requested with only the root scope open");
            return None;
        }
        let scope = self.scopes.pop();
        trace!(depth = self.scopes.len(), "Exited scope");
        scope
    }

    pub fn current_handle(&self) -> ScopeHandle {
        ScopeHandle(self.scopes.len() - 1)
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn get(&self, handle: ScopeHandle) -> Option<&Scope> {
        self.scopes.get(handle.0)
    }

    /// Scopes from `handle` back to the root, nearest first.
    pub fn ancestors(&self, handle: ScopeHandle) -> Ancestors<'_> {
        Ancestors {
            stack: self,
            next: Some(handle),
        }
    }

    pub fn cluster(&self) -> Option<String> {
        self.cluster_at(self.current_handle())
    }

    pub fn project(&self) -> Option<String> {
        self.project_at(self.current_handle())
    }

    pub fn token(&self) -> Option<String> {
        self.token_at(self.current_handle())
    }

    pub fn loglevel(&self) -> Option<u8> {
        self.loglevel_at(self.current_handle())
    }

    pub fn cluster_at(&self, handle: ScopeHandle) -> Option<String> {
        self.ancestors(handle)
            .find_map(|s| s.cluster.clone())
            .or_else(defaults::default_cluster)
    }

    /// Project resolution stops at the first scope that switches cluster: a
    /// project name is never carried across into another cluster's scope.
    pub fn project_at(&self, handle: ScopeHandle) -> Option<String> {
        for scope in self.ancestors(handle) {
            if let Some(project) = &scope.project {
                return Some(project.clone());
            }
            if scope.cluster.is_some() {
                break;
            }
        }
        defaults::default_project()
    }

    pub fn token_at(&self, handle: ScopeHandle) -> Option<String> {
        self.ancestors(handle)
            .find_map(|s| s.token.clone())
            .or_else(defaults::default_token)
    }

    pub fn loglevel_at(&self, handle: ScopeHandle) -> Option<u8> {
        self.ancestors(handle)
            .find_map(|s| s.loglevel)
            .or_else(defaults::default_loglevel)
    }

    pub fn resolve(&self) -> ResolvedContext {
        let handle = self.current_handle();
        ResolvedContext {
            cluster: self.cluster_at(handle),
            project: self.project_at(handle),
            token: self.token_at(handle),
            loglevel: self.loglevel_at(handle),
        }
    }

    /// True if any deadline anywhere in the current chain has passed.
    pub fn is_out_of_time(&self) -> bool {
        let now = Utc::now();
        self.ancestors(self.current_handle())
            .any(|s| s.deadline_passed(now))
    }

    /// Time left before the earliest deadline in the current chain, if any.
    pub fn time_remaining(&self) -> Option<Duration> {
        let now = Utc::now();
        self.ancestors(self.current_handle())
            .filter_map(|s| s.deadline)
            .map(|deadline| (deadline - now).to_std().unwrap_or(Duration::ZERO))
            .min()
    }

    /// Append `names` to every change tracker in the current chain.
    pub fn register_changes<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return;
        }
        for handle in self.chain() {
            if let Some(tracker) = self.scopes[handle.0].changes.as_mut() {
                tracker.extend(names.iter().cloned());
            }
        }
    }

    /// Append `action` to every result tracker in the current chain.
    pub fn register_action(&mut self, action: Action) {
        for handle in self.chain() {
            if let Some(result) = self.scopes[handle.0].result.as_mut() {
                result.add_action(action.clone());
            }
        }
    }

    /// Changes tracked by the current scope.
    pub fn changes(&self) -> Option<&[String]> {
        self.current().changes()
    }

    /// Actions tracked by the current scope.
    pub fn result(&self) -> Option<&crate::action::ActionResult> {
        self.current().result()
    }

    fn chain(&self) -> Vec<ScopeHandle> {
        let mut handles = Vec::with_capacity(self.scopes.len());
        let mut next = Some(self.current_handle());
        while let Some(handle) = next {
            handles.push(handle);
            next = self.scopes.get(handle.0).and_then(|s| s.parent);
        }
        handles
    }
}

/// Iterator over an ancestor chain.
pub struct Ancestors<'a> {
    stack: &'a ContextStack,
    next: Option<ScopeHandle>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.stack.get(self.next?)?;
        self.next = scope.parent;
        Some(scope)
    }
}
