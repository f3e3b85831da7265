//! Catalog validation specs

use crate::prelude::*;

#[test]
fn valid_catalog_passes_with_next_fire_times() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    project
        .tickr()
        .args(["check"])
        .passes()
        .stdout_has("ok   schedule hourly (always) next:")
        .stdout_has("ok   task example (shell-steps)");
}

#[test]
fn unknown_module_kinds_fail_the_check() {
    let project = Project::with_catalog(
        r#"
[[schedule]]
name = "mystery"
cron = "@daily"
predicate = { kind = "crystal-ball", task = "example" }

[tasks.example]
kind = "teleport"
"#,
    );

    project
        .tickr()
        .args(["check"])
        .fails()
        .stdout_has("FAIL schedule mystery")
        .stdout_has("unknown predicate kind: crystal-ball")
        .stdout_has("unknown task kind: teleport");
}

#[test]
fn dangling_task_reference_is_reported() {
    let project = Project::with_catalog(
        r#"
[[schedule]]
name = "typo"
cron = "@hourly"
predicate = { kind = "always", task = "exmaple" }
"#,
    );

    project
        .tickr()
        .args(["check"])
        .fails()
        .stdout_has("selects undefined task 'exmaple'");
}

#[test]
fn json_output_is_machine_readable() {
    let project = Project::with_catalog(HOURLY_CATALOG);

    let run = project
        .tickr()
        .args(["check", "--format", "json"])
        .passes();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["item"], "schedule hourly");
}
