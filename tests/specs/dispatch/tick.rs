//! Single-tick dispatch specs

use crate::prelude::*;

#[test]
fn due_entry_runs_its_task() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR])
        .passes()
        .stdout_eq("hourly: example succeeded\n");

    assert_eq!(project.read("marker.txt"), "ran\n");
}

#[test]
fn nothing_due_runs_nothing() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["tick", "--at", OFF_THE_HOUR])
        .passes()
        .stdout_eq("no schedule due\n");

    assert!(!project.exists("marker.txt"));
}

#[test]
fn failing_task_sets_exit_status() {
    let project = Project::with_catalog(
        r#"
[[schedule]]
name = "hourly"
cron = "0 * * * *"
predicate = { kind = "always", task = "broken" }

[tasks.broken]
kind = "shell-steps"
steps = [
    { name = "first", run = "echo one > first.txt" },
    { name = "fails", run = "exit 3" },
    { name = "never", run = "echo three > never.txt" },
]
"#,
    );

    let run = project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR])
        .fails()
        .stdout_has("hourly: broken failed");
    assert_eq!(run.code(), Some(1));

    assert!(project.exists("first.txt"));
    assert!(!project.exists("never.txt"));
}

#[test]
fn predicate_declining_selects_nothing() {
    let project = Project::with_catalog(
        r#"
[[schedule]]
name = "flagged"
cron = "0 * * * *"
predicate = { kind = "path-exists", path = "deploy.flag", task = "example" }

[tasks.example]
kind = "shell-steps"
steps = [{ name = "mark", run = "echo ran > marker.txt" }]
"#,
    );

    project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR])
        .passes()
        .stdout_eq("flagged: no task selected\n");

    project.file("deploy.flag", "");
    project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR])
        .passes()
        .stdout_has("flagged: example succeeded");
    assert!(project.exists("marker.txt"));
}

#[test]
fn unknown_task_id_is_reported_without_running() {
    let project = Project::with_catalog(
        r#"
[[schedule]]
name = "typo"
cron = "0 * * * *"
predicate = { kind = "always", task = "missing" }
"#,
    );

    project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR])
        .fails()
        .stdout_has("typo: error: unknown task id: missing");
}

#[test]
fn logs_go_to_the_requested_file() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["--log-file", "logs/tickr.log", "tick", "--at", ON_THE_HOUR])
        .passes();

    let log = project.read("logs/tickr.log");
    assert!(log.contains("dispatching task"), "log:\n{log}");
    assert!(log.contains("echo ran > marker.txt"), "log:\n{log}");
}

#[test]
fn json_outcomes() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    let run = project
        .tickr()
        .args(["tick", "--at", ON_THE_HOUR, "--format", "json"])
        .passes();
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed[0]["outcome"], "task-dispatched");
    assert_eq!(parsed[0]["task"], "example");
    assert_eq!(parsed[0]["success"], true);
}
