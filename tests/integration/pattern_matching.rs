//! Integration tests for existential subset matching over lists.

use oc_client::model::{ListView, Model};
use serde_json::{json, Value};

fn list(value: &Value) -> ListView<'_> {
    ListView::new(value.as_array().unwrap())
}

#[test]
fn test_scalar_list_membership() {
    let items = json!(["a", "b", "c"]);
    let l1 = list(&items);
    assert!(l1.can_match(&[json!("b"), json!("c")]));
    assert!(l1.can_match(&[json!("a"), json!("c")]));
    assert!(l1.can_match(&[json!("c")]));
    assert!(l1.can_match(&[json!("a")]));

    assert!(!l1.can_match(&[json!("1")]));
    assert!(!l1.can_match(&[json!("1"), json!("2")]));
    assert!(!l1.can_match(&[json!(true)]));
    assert!(!l1.can_match(&[json!({"a": 2})]));
}

#[test]
fn test_boolean_list_is_type_sensitive() {
    let items = json!([true]);
    let l2 = list(&items);
    assert!(l2.can_match(&[json!(true)]));
    assert!(!l2.can_match(&[json!(false)]));
    assert!(!l2.can_match(&[json!(1)]));
}

#[test]
fn test_map_list_subset_patterns() {
    let items = json!([
        {"a": 1, "b": 2, "c": 3},
        {"d": 1, "e": 2, "f": 3},
        {"d": true, "e": [2, 3, true], "f": 3}
    ]);
    let l3 = list(&items);

    assert!(l3.matches(&json!({"c": 3})));
    assert!(l3.matches(&json!({"c": 3, "a": 1})));
    assert!(l3.matches(&json!({"c": 3, "a": 1, "b": 2})));
    assert!(!l3.matches(&json!({"a": 1, "b": 3})));
    assert!(!l3.matches(&json!({"b": 3})));
    assert!(l3.matches(&json!({"d": true, "f": 3})));

    assert!(!l3.matches(&json!({"e": 3})));
    assert!(l3.matches(&json!({"e": [3]})));
    assert!(l3.matches(&json!({"e": [2, 3]})));
    assert!(l3.matches(&json!({"e": [2, 3, true]})));
    assert!(!l3.matches(&json!({"d": true, "e": [2, 3, false]})));
    assert!(l3.matches(&json!({"d": true, "e": [2, 3, true]})));
}

#[test]
fn test_pattern_must_hold_within_one_element() {
    let items = json!([{"a": 1}, {"b": 2}]);
    assert!(!list(&items).matches(&json!({"a": 1, "b": 2})));
}

#[test]
fn test_nested_map_patterns() {
    let items = json!([{
        "a": 1,
        "b": {
            "a1": 5,
            "b1": {"a2": 6, "b2": {"a3": 7, "b3": 8}}
        },
        "c": 3
    }]);
    let l4 = list(&items);

    assert!(l4.matches(&json!({"a": 1})));
    assert!(l4.matches(&json!({"a": 1, "b": {"a1": 5}})));
    assert!(l4.matches(&json!({"a": 1, "b": {"a1": 5, "b1": {"a2": 6}}})));
    assert!(l4.matches(&json!({"a": 1, "b": {"a1": 5, "b1": {"b2": {"b3": 8}}}})));

    assert!(!l4.matches(&json!({"b": {"b1": {"b2": {"b4": 8}}}})));
    assert!(!l4.matches(&json!({"b": {"b1": {"b2": {"b3": 9}}}})));
    assert!(!l4.matches(&json!({"c": {"x": 3}})));
}

#[test]
fn test_matching_pod_conditions() {
    let pod = Model::from_value(json!({
        "status": {
            "conditions": [
                {"type": "Ready", "status": "False", "reason": "ContainersNotReady"},
                {"type": "PodScheduled", "status": "True"}
            ]
        }
    }))
    .unwrap();
    let conditions = pod.path(&["status", "conditions"]).as_list().unwrap();
    assert!(conditions.matches(&json!({"type": "PodScheduled", "status": "True"})));
    assert!(!conditions.matches(&json!({"type": "Ready", "status": "True"})));
}
