//! Integration tests for running actions through a runner under tracked scopes.

use oc_client::context::{current, ContextStack, Scope};
use oc_client::error::ClientError;
use oc_client::runner::{run_action, run_current};
use oc_client::{ActionResult, CommandOutput, CommandRunner, ResolvedContext};
use std::cell::RefCell;
use std::time::Duration;

/// Runner that answers from a script and remembers what it was asked.
struct ScriptedRunner {
    replies: RefCell<Vec<CommandOutput>>,
    calls: RefCell<Vec<(String, ResolvedContext)>>,
}

impl ScriptedRunner {
    fn new(replies: Vec<CommandOutput>) -> Self {
        Self {
            replies: RefCell::new(replies),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        context: &ResolvedContext,
        verb: &str,
        _args: &[String],
    ) -> Result<CommandOutput, ClientError> {
        self.calls
            .borrow_mut()
            .push((verb.to_string(), context.clone()));
        let mut replies = self.replies.borrow_mut();
        if replies.is_empty() {
            return Err(ClientError::Runner("no scripted reply".to_string()));
        }
        Ok(replies.remove(0))
    }
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        status: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

#[test]
fn test_nested_trackers_see_every_action() {
    let runner = ScriptedRunner::new(vec![ok("pod/a\n"), ok("pod/b\n")]);
    let outer = current::enter(Scope::tracker());
    {
        let _project = current::enter(Scope::project("p1"));
        let inner = current::enter(Scope::tracker());
        run_current(&runner, "get", &["pods".to_string()]).unwrap();
        let inner_result = inner.result().unwrap();
        assert_eq!(inner_result.actions().len(), 1);
    }
    run_current(&runner, "delete", &["pod/b".to_string()]).unwrap();

    let result: ActionResult = outer.result().unwrap();
    let verbs: Vec<_> = result.actions().iter().map(|a| a.verb.clone()).collect();
    assert_eq!(verbs, vec!["get", "delete"]);
    assert_eq!(result.out(), "pod/a\npod/b");
    assert_eq!(runner.calls.borrow()[0].1.project.as_deref(), Some("p1"));
}

#[test]
fn test_failed_command_surfaces_through_fail_if() {
    let runner = ScriptedRunner::new(vec![CommandOutput {
        status: 1,
        stdout: String::new(),
        stderr: "Error from server (AlreadyExists)".to_string(),
    }]);
    let tracker = current::enter(Scope::tracker());
    let action = run_current(&runner, "create", &["-f".to_string(), "x.json".to_string()])
        .unwrap();
    assert!(!action.succeeded());

    let err = tracker.result().unwrap().fail_if("create returned an error").unwrap_err();
    match err {
        ClientError::CommandFailed { status, err, .. } => {
            assert_eq!(status, 1);
            assert!(err.contains("AlreadyExists"));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_expired_timeout_blocks_runner() {
    let runner = ScriptedRunner::new(vec![ok("")]);
    let mut stack = ContextStack::new();
    stack.enter(Scope::tracker());
    stack.enter(Scope::timeout(Some(Duration::ZERO)));
    std::thread::sleep(Duration::from_millis(5));

    assert!(matches!(
        run_action(&mut stack, &runner, "get", &[]),
        Err(ClientError::OutOfTime)
    ));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_runner_error_propagates() {
    let runner = ScriptedRunner::new(vec![]);
    let mut stack = ContextStack::new();
    let tracker = stack.enter(Scope::tracker());
    assert!(matches!(
        run_action(&mut stack, &runner, "get", &[]),
        Err(ClientError::Runner(_))
    ));
    assert!(stack.get(tracker).unwrap().result().unwrap().is_empty());
}
