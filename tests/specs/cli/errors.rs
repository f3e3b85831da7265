//! Error reporting specs

use crate::prelude::*;

#[test]
fn missing_catalog_explains_how_to_point_at_one() {
    let project = Project::empty();

    let run = project
        .tickr()
        .args(["check"])
        .fails()
        .stderr_has("Failed to load catalog")
        .stderr_has("--catalog");
    assert_eq!(run.code(), Some(2));
}

#[test]
fn invalid_cron_names_the_expression() {
    let project = Project::with_catalog(
        r#"
[[schedule]]
name = "broken"
cron = "every tuesday"
predicate = { kind = "always", task = "t" }
"#,
    );

    project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR])
        .fails()
        .stderr_has("every tuesday")
        .stderr_has("suggestions:");
}

#[test]
fn duplicate_task_ids_are_rejected() {
    let project = Project::empty();
    project.file(
        "tickr.json",
        r#"{
  "tasks": {
    "deploy": { "kind": "shell-steps", "steps": [] },
    "deploy": { "kind": "shell-steps", "steps": [] }
  }
}"#,
    );

    project
        .tickr()
        .args(["--catalog", "tickr.json", "check"])
        .fails()
        .stderr_has("deploy");
}

#[test]
fn unknown_task_lists_defined_ones() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["task", "nope"])
        .fails()
        .stderr_has("'nope'")
        .stderr_has("example");
}

#[test]
fn malformed_timestamp_is_a_usage_error() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["tick", "--at", "noon"])
        .fails()
        .stderr_has("RFC 3339");
}
