//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let project = Project::empty();

    project
        .tickr()
        .args(["--help"])
        .passes()
        .stdout_has("daemon")
        .stdout_has("tick")
        .stdout_has("check")
        .stdout_has("task")
        .stdout_has("--dry-run");
}

#[test]
fn version_is_printed() {
    let project = Project::empty();

    project
        .tickr()
        .args(["--version"])
        .passes()
        .stdout_has("tickr");
}
