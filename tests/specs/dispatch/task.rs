//! Manual task invocation specs

use crate::prelude::*;

#[test]
fn runs_task_regardless_of_schedule() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["task", "example"])
        .passes()
        .stdout_eq("manual: example succeeded\n");

    assert!(project.exists("marker.txt"));
}

#[test]
fn discovered_artifact_feeds_later_steps() {
    let project = Project::with_catalog(
        r#"
[tasks.ship]
kind = "shell-steps"
steps = [
    { name = "build", run = "mkdir -p dist && echo image > dist/app-1.tar.gz" },
    { discover = "app-*.tar.gz", root = "dist" },
    { name = "upload", run = "cp {artifact} shipped.tar.gz" },
]
"#,
    );

    project.tickr().args(["task", "ship"]).passes();

    assert_eq!(project.read("shipped.tar.gz"), "image\n");
}

#[test]
fn missing_artifact_fails_the_task() {
    let project = Project::with_catalog(
        r#"
[tasks.ship]
kind = "shell-steps"
steps = [
    { discover = "app-*.tar.gz" },
    { name = "upload", run = "touch uploaded" },
]
"#,
    );

    project
        .tickr()
        .args(["task", "ship"])
        .fails()
        .stdout_has("manual: ship failed")
        .stderr_has("app-*.tar.gz");

    assert!(!project.exists("uploaded"));
}
