//! Per-thread context stack.
//!
//! Every thread lazily gets its own `ContextStack` with a fresh root scope.
//! Threads spawned from inside a scope see only the process-wide defaults;
//! scopes have to be entered again on the new thread.

use super::scope::{Scope, ScopeHandle};
use super::stack::{ContextStack, ResolvedContext};
use crate::action::{Action, ActionResult};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::warn;

thread_local! {
    static STACK: RefCell<ContextStack> = RefCell::new(ContextStack::new());
}

/// Run `f` against this thread's stack.
///
/// Not re-entrant: `f` must not call the mutating functions of this module,
/// enter a scope, or drop a `ScopeGuard`. A mutation panics with a borrow
/// error; a guard dropped inside `f` cannot exit its scope and leaves it open.
pub fn with_stack<R>(f: impl FnOnce(&ContextStack) -> R) -> R {
    STACK.with(|stack| f(&stack.borrow()))
}

/// Run `f` against this thread's stack, mutably.
///
/// Not re-entrant: `f` must not call any other function of this module,
/// directly or through a `CommandRunner`. Mutate `stack` itself instead.
pub fn with_stack_mut<R>(f: impl FnOnce(&mut ContextStack) -> R) -> R {
    STACK.with(|stack| f(&mut stack.borrow_mut()))
}

/// Enter `scope` on this thread. The scope is exited when the guard drops.
pub fn enter(scope: Scope) -> ScopeGuard {
    let handle = with_stack_mut(|stack| stack.enter(scope));
    ScopeGuard {
        handle,
        active: true,
        _not_send: PhantomData,
    }
}

/// Run `f` inside `scope`.
pub fn scoped<R>(scope: Scope, f: impl FnOnce() -> R) -> R {
    let _guard = enter(scope);
    f()
}

pub fn depth() -> usize {
    with_stack(|stack| stack.depth())
}

pub fn cluster() -> Option<String> {
    with_stack(|stack| stack.cluster())
}

pub fn project() -> Option<String> {
    with_stack(|stack| stack.project())
}

pub fn token() -> Option<String> {
    with_stack(|stack| stack.token())
}

pub fn loglevel() -> Option<u8> {
    with_stack(|stack| stack.loglevel())
}

pub fn resolve() -> ResolvedContext {
    with_stack(|stack| stack.resolve())
}

pub fn is_out_of_time() -> bool {
    with_stack(|stack| stack.is_out_of_time())
}

pub fn time_remaining() -> Option<Duration> {
    with_stack(|stack| stack.time_remaining())
}

pub fn register_changes<I, S>(names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    with_stack_mut(|stack| stack.register_changes(names))
}

pub fn register_action(action: Action) {
    with_stack_mut(|stack| stack.register_action(action))
}

/// Open scope on this thread's stack. Exits the scope on drop, including
/// early returns and unwinding.
///
/// Guards must be dropped in reverse order of creation.
#[must_use = "the scope exits as soon as the guard is dropped"]
pub struct ScopeGuard {
    handle: ScopeHandle,
    active: bool,
    // Scopes live in thread-local storage; the guard must stay on its thread.
    _not_send: PhantomData<*const ()>,
}

impl ScopeGuard {
    pub fn handle(&self) -> ScopeHandle {
        self.handle
    }

    /// Snapshot of the changes tracked by this scope so far.
    pub fn changes(&self) -> Option<Vec<String>> {
        with_stack(|stack| {
            stack
                .get(self.handle)
                .and_then(|s| s.changes())
                .map(<[String]>::to_vec)
        })
    }

    /// Snapshot of the actions tracked by this scope so far.
    pub fn result(&self) -> Option<ActionResult> {
        with_stack(|stack| stack.get(self.handle).and_then(|s| s.result()).cloned())
    }

    /// Exit now and return the scope with whatever its trackers collected.
    pub fn finish(mut self) -> Option<Scope> {
        self.active = false;
        exit_scope(self.handle)
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if self.active {
            exit_scope(self.handle);
        }
    }
}

fn exit_scope(handle: ScopeHandle) -> Option<Scope> {
    STACK
        .try_with(|stack| {
            let mut stack = match stack.try_borrow_mut() {
                Ok(stack) => stack,
                Err(_) => {
                    warn!("Context stack busy while exiting scope");
                    return None;
                }
            };
            debug_assert_eq!(
                stack.current_handle(),
                handle,
                "scopes must exit in reverse order of entry"
            );
            stack.exit()
        })
        .ok()
        .flatten()
}
