//! Command Runner
//!
//! Contract for the collaborator that actually invokes the CLI, and the glue
//! that gates an invocation on the current context and records its outcome in
//! every enclosing result tracker.

use crate::action::Action;
use crate::context::{current, ContextStack};
use crate::error::ClientError;
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, warn};

pub use crate::context::ResolvedContext;

/// Captured outcome of one CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a named verb with arguments against a resolved context.
pub trait CommandRunner {
    fn run(
        &self,
        context: &ResolvedContext,
        verb: &str,
        args: &[String],
    ) -> Result<CommandOutput, ClientError>;
}

/// Run `verb` under `stack`'s current context and register the action.
///
/// Refuses to run once any enclosing deadline has passed; the refused action is
/// still registered, marked as timed out, so trackers see it.
pub fn run_action<R>(
    stack: &mut ContextStack,
    runner: &R,
    verb: &str,
    args: &[String],
) -> Result<Action, ClientError>
where
    R: CommandRunner + ?Sized,
{
    let context = admit(stack, verb, args)?;
    let action = execute(runner, &context, verb, args)?;
    stack.register_action(action.clone());
    Ok(action)
}

/// [`run_action`] against this thread's context stack.
///
/// The stack is not borrowed while the runner executes, so a runner may itself
/// consult the current context.
pub fn run_current<R>(runner: &R, verb: &str, args: &[String]) -> Result<Action, ClientError>
where
    R: CommandRunner + ?Sized,
{
    let context = current::with_stack_mut(|stack| admit(stack, verb, args))?;
    let action = execute(runner, &context, verb, args)?;
    current::register_action(action.clone());
    Ok(action)
}

/// Check deadlines and resolve the context the action will run with.
fn admit(
    stack: &mut ContextStack,
    verb: &str,
    args: &[String],
) -> Result<ResolvedContext, ClientError> {
    if stack.is_out_of_time() {
        warn!(verb, "Refusing to run action: deadline expired");
        let mut action = Action::new(verb, args.to_vec());
        action.status = -1;
        action.timed_out = true;
        stack.register_action(action);
        return Err(ClientError::OutOfTime);
    }
    Ok(stack.resolve())
}

fn execute<R>(
    runner: &R,
    context: &ResolvedContext,
    verb: &str,
    args: &[String],
) -> Result<Action, ClientError>
where
    R: CommandRunner + ?Sized,
{
    debug!(
        verb,
        cluster = context.cluster.as_deref().unwrap_or(""),
        project = context.project.as_deref().unwrap_or(""),
        loglevel = context.loglevel,
        "Running action"
    );

    let mut action = Action::new(verb, args.to_vec());
    action.started_at = Utc::now();
    let started = Instant::now();
    let output = runner.run(context, verb, args)?;
    action.elapsed = started.elapsed();
    action.status = output.status;
    action.out = output.stdout;
    action.err = output.stderr;

    debug!(
        verb,
        status = action.status,
        elapsed_ms = action.elapsed.as_millis() as u64,
        "Action finished"
    );
    Ok(action)
}
