//! Dry-run specs: every task command is logged, none is executed

use crate::prelude::*;

#[test]
fn flag_suppresses_task_commands() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["--dry-run", "tick", "--at", ON_THE_HOUR])
        .passes()
        .stdout_has("hourly: example succeeded")
        .stderr_has("dry run");

    assert!(!project.exists("marker.txt"));
}

#[test]
fn environment_variables_enable_dry_run() {
    for var in ["TICKR_DRY_RUN", "DRY_RUN"] {
        let project = Project::with_catalog(HOURLY_CATALOG);

        project
            .tickr()
            .env(var, "true")
            .args(["tick", "--at", ON_THE_HOUR])
            .passes()
            .stderr_has("echo ran > marker.txt");

        assert!(!project.exists("marker.txt"), "{var} should enable dry run");
    }
}

#[test]
fn falsy_value_runs_for_real() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .env("TICKR_DRY_RUN", "0")
        .args(["tick", "--at", ON_THE_HOUR])
        .passes();

    assert!(project.exists("marker.txt"));
}

#[test]
fn manual_task_honours_dry_run() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["--dry-run", "task", "example"])
        .passes()
        .stdout_has("manual: example succeeded");

    assert!(!project.exists("marker.txt"));
}
