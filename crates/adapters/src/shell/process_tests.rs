// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;
use std::time::Duration;

fn runner() -> ProcessRunner {
    ProcessRunner::default()
}

#[tokio::test]
async fn captures_stdout_and_exit_code() {
    let output = runner()
        .run(&CommandSpec::shell("echo hello; echo oops >&2"))
        .await
        .unwrap();

    let outcome = output.outcome().unwrap();
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.stdout_trimmed(), "hello");
    assert_eq!(outcome.stderr.trim(), "oops");
    assert_eq!(outcome.command, "echo hello; echo oops >&2");
}

#[tokio::test]
async fn argv_runs_without_a_shell() {
    let output = runner()
        .run(&CommandSpec::argv(["echo", "$HOME"]))
        .await
        .unwrap();
    // No shell: the argument is not expanded
    assert_eq!(output.outcome().unwrap().stdout_trimmed(), "$HOME");
}

#[tokio::test]
async fn runs_in_requested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner()
        .run(&CommandSpec::shell("pwd").cwd(dir.path()))
        .await
        .unwrap();
    let printed = output.outcome().unwrap().stdout_trimmed().to_string();
    assert_eq!(
        Path::new(&printed).canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn fail_fast_turns_non_zero_exit_into_error() {
    let err = runner()
        .run(&CommandSpec::shell("echo partial; echo bad >&2; exit 3"))
        .await
        .unwrap_err();

    match err {
        CommandError::Failed {
            exit_code,
            stdout,
            stderr,
            ..
        } => {
            assert_eq!(exit_code, 3);
            assert_eq!(stdout.trim(), "partial");
            assert_eq!(stderr.trim(), "bad");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn non_fail_fast_returns_outcome_for_inspection() {
    let output = runner()
        .run(&CommandSpec::shell("exit 2").fail_fast(false))
        .await
        .unwrap();
    assert!(!output.succeeded());
    assert_eq!(output.outcome().unwrap().exit_code, 2);
}

#[tokio::test]
async fn dry_run_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("touched");
    let spec = CommandSpec::shell(format!("touch {}", marker.display())).dry_run(true);

    let output = runner().run(&spec).await.unwrap();

    assert!(output.is_suppressed());
    assert!(output.succeeded());
    assert!(!marker.exists());
}

#[tokio::test]
async fn timeout_aborts_long_command_promptly() {
    let start = std::time::Instant::now();
    let err = runner()
        .run(&CommandSpec::shell("sleep 5").timeout(Duration::from_millis(200)))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn timeout_kills_processes_started_by_the_shell() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("late-side-effect");
    let spec = CommandSpec::shell(format!("(sleep 1; touch {}); echo done", marker.display()))
        .timeout(Duration::from_millis(200));

    let err = runner().run(&spec).await.unwrap_err();
    assert!(err.is_timeout());

    tokio::time::sleep(Duration::from_millis(1800)).await;
    assert!(
        !marker.exists(),
        "subshell outlived the timeout and wrote {}",
        marker.display()
    );
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    let err = runner()
        .run(&CommandSpec::argv(["definitely-not-a-real-binary-tickr"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::Spawn { .. }));
}

#[tokio::test]
async fn empty_command_is_rejected() {
    let err = runner().run(&CommandSpec::shell("  ")).await.unwrap_err();
    assert!(matches!(err, CommandError::Empty));
}

#[tokio::test]
async fn stdin_is_detached() {
    // `cat` with no input must see EOF immediately instead of blocking
    let output = runner()
        .run(&CommandSpec::shell("cat").timeout(Duration::from_secs(5)))
        .await
        .unwrap();
    assert_eq!(output.outcome().unwrap().stdout, "");
}

#[tokio::test]
async fn sourced_profile_resolves_rc_functions() {
    if !Path::new("/bin/bash").exists() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let rc = dir.path().join("rc.sh");
    std::fs::write(&rc, "echo noisy-startup\ngreet() { echo \"hi $1\"; }\n").unwrap();

    let runner = ProcessRunner::new(ShellProfile::new("/bin/bash", &rc));
    let output = runner
        .run(&CommandSpec::argv(["greet", "there"]).sourced())
        .await
        .unwrap();

    // The startup file's own output is discarded
    assert_eq!(output.outcome().unwrap().stdout, "hi there\n");
}
