//! End-to-end tests: load a project from disk and resolve it.

mod common;

use ar_core::config::loader::{load_manifest_file, load_project};
use ar_core::graph::GraphFormat;
use ar_core::Resolver;
use common::*;

const ORCHESTRATOR: &str = r#"apiVersion: ossa/v0.3.3
kind: Agent
metadata:
  name: orchestrator
  version: 1.0.0
spec:
  role: coordinates work
  dependencies:
    agents:
      - name: worker
        version: ^1.2.0
        contract:
          publishes: [task.completed]
          commands: [start]
      - name: audit-log
        version: ^0.3.0
        required: false
  messaging:
    subscribes:
      - channel: task.completed
        schema:
          type: object
          properties:
            id: { type: string }
          required: [id]
"#;

const WORKER: &str = r#"apiVersion: ossa/v0.3.3
kind: Agent
metadata:
  name: worker
  version: 1.4.2
spec:
  messaging:
    publishes:
      - channel: task.completed
        schema:
          type: object
          properties:
            id: { type: string }
            durationMs: { type: integer }
          required: [id]
        examples:
          - { id: "t-1", durationMs: 12 }
    commands:
      - name: start
        inputSchema:
          type: object
          properties:
            id: { type: string }
        timeoutSeconds: 30
"#;

#[tokio::test]
async fn test_valid_project_end_to_end() {
    let project_dir = create_test_project(
        &[("orchestrator.yaml", ORCHESTRATOR), ("worker.yml", WORKER)],
        None,
    )
    .expect("Failed to create test project");

    let project = load_project(project_dir.path())
        .await
        .expect("Failed to load project");
    assert_eq!(project.manifests.len(), 2);

    let resolver = Resolver::new(project.config);
    let result = resolver.validate_dependencies(&project.manifests);
    assert!(result.valid, "{result:#?}");
    assert!(result.warnings.is_empty(), "{:#?}", result.warnings);

    let batches = resolver
        .calculate_deployment_order(&project.manifests)
        .expect("Acyclic project must order");
    assert_eq!(batches.len(), 2);
    assert!(batches[0].contains("worker"));
    assert!(batches[1].contains("orchestrator"));

    let dot = resolver
        .generate_dependency_graph(&project.manifests, GraphFormat::Dot)
        .expect("DOT export");
    assert!(dot.contains("\"orchestrator\" -> \"worker\" [style=solid, label=\"^1.2.0\"];"));
    assert!(dot.contains("\"orchestrator\" -> \"audit-log\" [style=dashed, label=\"^0.3.0\"];"));
}

#[tokio::test]
async fn test_project_with_broken_contract() {
    let worker_without_start = WORKER.replace("name: start", "name: begin");
    let project_dir = create_test_project(
        &[
            ("orchestrator.yaml", ORCHESTRATOR),
            ("worker.yaml", worker_without_start.as_str()),
        ],
        None,
    )
    .expect("Failed to create test project");

    let project = load_project(project_dir.path())
        .await
        .expect("Failed to load project");
    let result = Resolver::new(project.config).validate_dependencies(&project.manifests);

    assert_findings(&result, 0, 0, 0, 1);
    assert!(result.contract_violations[0].violation.contains("'start'"));
}

#[tokio::test]
async fn test_project_config_controls_example_checks() {
    let bad_example = WORKER.replace("{ id: \"t-1\", durationMs: 12 }", "{ durationMs: 12 }");
    let manifests = [("worker.yaml", bad_example.as_str())];

    let checked_dir = create_test_project(&manifests, None).expect("Failed to create test project");
    let checked = load_project(checked_dir.path()).await.expect("Failed to load project");
    let result = Resolver::new(checked.config).validate_dependencies(&checked.manifests);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].message.contains("example #1"));

    let skipped_dir = create_test_project(&manifests, Some("validate-examples = false"))
        .expect("Failed to create test project");
    let skipped = load_project(skipped_dir.path()).await.expect("Failed to load project");
    let result = Resolver::new(skipped.config).validate_dependencies(&skipped.manifests);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_diff_two_manifest_files() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let old_path = dir.path().join("worker-1.4.2.yaml");
    let new_path = dir.path().join("worker-2.0.0.yaml");
    std::fs::write(&old_path, WORKER).expect("Failed to write old manifest");
    std::fs::write(
        &new_path,
        WORKER
            .replace("version: 1.4.2", "version: 2.0.0")
            .replace("channel: task.completed", "channel: task.finished"),
    )
    .expect("Failed to write new manifest");

    let old = load_manifest_file(&old_path).expect("Failed to load old manifest");
    let new = load_manifest_file(&new_path).expect("Failed to load new manifest");
    let result = Resolver::default()
        .detect_breaking_changes(&old, &new)
        .expect("Same agent");

    assert!(result.has_breaking_changes);
    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].resource, "event:task.completed");
    assert_eq!(result.changes[0].old_version, "1.4.2");
    assert_eq!(result.changes[0].new_version, "2.0.0");
}
