//! Resolution properties over generated scope chains

use oc_client::context::{install_defaults, ContextStack, Defaults, Scope};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Layer {
    cluster: Option<String>,
    project: Option<String>,
}

fn layer() -> impl Strategy<Value = Layer> {
    (
        prop::option::of("c[0-9]"),
        prop::option::of("p[0-9]"),
    )
        .prop_map(|(cluster, project)| Layer { cluster, project })
}

/// Walk the chain innermost first, stopping project lookup at a cluster switch.
fn expected(layers: &[Layer], defaults: &Defaults) -> (Option<String>, Option<String>) {
    let cluster = layers
        .iter()
        .rev()
        .find_map(|l| l.cluster.clone())
        .or_else(|| defaults.cluster.clone());
    let mut project = None;
    for l in layers.iter().rev() {
        if l.project.is_some() {
            project = l.project.clone();
            break;
        }
        if l.cluster.is_some() {
            break;
        }
    }
    (cluster, project.or_else(|| defaults.project.clone()))
}

/// The only test in this binary that touches the process-wide defaults.
#[test]
fn test_resolution_matches_reference_walk() {
    let defaults = Defaults {
        cluster: Some("default-cluster".to_string()),
        project: Some("default-project".to_string()),
        token: None,
        loglevel: None,
    };
    install_defaults(defaults.clone());

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(&prop::collection::vec(layer(), 0..8), |layers| {
            let mut stack = ContextStack::new();
            for l in &layers {
                let mut scope = Scope::new();
                scope.cluster = l.cluster.clone();
                scope.project = l.project.clone();
                stack.enter(scope);
            }
            let (cluster, project) = expected(&layers, &defaults);
            prop_assert_eq!(stack.cluster(), cluster);
            prop_assert_eq!(stack.project(), project);
            Ok(())
        })
        .unwrap();
}
