//! Integration tests for absence-safe navigation over decoded API objects.

use oc_client::error::ModelError;
use oc_client::model::{flatten_objects, Model, Node};
use serde_json::json;

const POD: &str = r#"{
    "apiVersion": "v1",
    "kind": "Pod",
    "metadata": {
        "name": "web-1",
        "namespace": "myproject",
        "labels": {"app": "web"},
        "annotations": null
    },
    "status": {
        "phase": "Running",
        "conditions": [
            {"type": "Ready", "status": "True"},
            {"type": "PodScheduled", "status": "True"}
        ],
        "podIPs": ["10.0.0.4"]
    }
}"#;

#[test]
fn test_decoded_object_navigation() {
    let pod = Model::from_json_str(POD).unwrap();
    assert_eq!(pod.qualified_name().as_deref(), Some("pod/web-1"));
    assert_eq!(pod.path(&["metadata", "labels", "app"]).as_str(), Some("web"));
    assert_eq!(pod.path(&["status", "phase"]).as_str(), Some("Running"));

    let conditions = pod.path(&["status", "conditions"]).as_list().unwrap();
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions.at(1).unwrap().get("type").as_str(), Some("PodScheduled"));
}

#[test]
fn test_absent_paths_are_missing_not_errors() {
    let pod = Model::from_json_str(POD).unwrap();
    let missing = pod.path(&["spec", "containers"]);
    assert_eq!(missing, Node::Missing);
    assert!(missing.get("anything").get("deeper").is_missing());
    assert!(pod.path(&["metadata", "labels", "tier"]).is_missing());
}

#[test]
fn test_null_annotation_is_present() {
    let pod = Model::from_json_str(POD).unwrap();
    let annotations = pod.path(&["metadata", "annotations"]);
    assert!(!annotations.is_missing());
    assert!(annotations.is_null());
    assert!(annotations.get("x").is_missing());

    let empty = Model::new();
    assert!(empty.get("a").is_missing());
    let mut explicit = Model::new();
    explicit.set("a", serde_json::Value::Null);
    assert!(!explicit.get("a").is_missing());
}

#[test]
fn test_positional_access_out_of_range() {
    let pod = Model::from_json_str(POD).unwrap();
    let ips = pod.path(&["status", "podIPs"]).as_list().unwrap();
    assert_eq!(ips.at(0).unwrap().as_str(), Some("10.0.0.4"));
    let err = ips.at(1).unwrap_err();
    assert!(matches!(err, ModelError::IndexOutOfRange { index: 1, len: 1 }));
}

#[test]
fn test_mutation_is_visible_through_views() {
    let mut pod = Model::from_json_str(POD).unwrap();
    pod.set("spec", json!({"nodeName": "worker-0"}));
    assert_eq!(pod.path(&["spec", "nodeName"]).as_str(), Some("worker-0"));
    pod.set("kind", "Service");
    assert_eq!(pod.qualified_name().as_deref(), Some("service/web-1"));
}

#[test]
fn test_flattened_list_items_become_models() -> anyhow::Result<()> {
    let objects = flatten_objects(json!({
        "kind": "List",
        "items": [
            {"kind": "Service", "metadata": {"name": "web"}},
            {"kind": "Route", "metadata": {"name": "web"}}
        ]
    }))?;
    let names = objects
        .into_iter()
        .map(Model::from_value)
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .filter_map(Model::qualified_name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["service/web", "route/web"]);
    Ok(())
}
