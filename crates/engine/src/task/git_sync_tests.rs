// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;
use tickr_adapters::{quote, FakeCommandRunner, FakeResponse};
use tickr_core::ModuleRef;

fn task(repo: &Path) -> GitSyncShip {
    GitSyncShip {
        repo: repo.to_path_buf(),
        remote: "origin".to_string(),
        branch: "sit".to_string(),
        prepare: None,
        build: Some(CommandLine::from("./build-scripts/build-container-only.sh iads")),
        verify: Some(CommandLine::from("apptest")),
        artifact: Some("be-iads-*.tar.gz".to_string()),
        upload: Some(CommandLine::from("scp-sit {artifact}")),
        timeout: Some(Duration::from_secs(30)),
        build_timeout: Some(Duration::from_secs(1800)),
    }
}

fn runner_on(branch: &str) -> FakeCommandRunner {
    let runner = FakeCommandRunner::new();
    runner.respond("rev-parse", FakeResponse::ok(format!("{branch}\n")));
    runner
}

fn repo_with_artifact() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("dist/be-iads-20260101.tar.gz");
    std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
    std::fs::write(&artifact, b"image").unwrap();
    (dir, artifact)
}

#[tokio::test]
async fn full_sequence_runs_in_order() {
    let (repo, artifact) = repo_with_artifact();
    let runner = runner_on("main");

    assert!(task(repo.path()).execute(&runner, false).await);

    assert_eq!(
        runner.executed(),
        vec![
            "git status --porcelain --untracked-files=no".to_string(),
            "git rev-parse --abbrev-ref HEAD".to_string(),
            "git checkout sit".to_string(),
            "git pull --ff-only origin sit".to_string(),
            "./build-scripts/build-container-only.sh iads".to_string(),
            "apptest".to_string(),
            format!("scp-sit {}", artifact.display()),
        ]
    );
}

#[tokio::test]
async fn ship_stages_use_sourced_profile_and_build_timeout() {
    let (repo, _) = repo_with_artifact();
    let runner = runner_on("sit");

    assert!(task(repo.path()).execute(&runner, false).await);

    let calls = runner.calls();
    let build = calls.iter().find(|c| c.command.contains("build")).unwrap();
    assert!(build.sourced);
    assert_eq!(build.timeout, Duration::from_secs(1800));
    let pull = calls.iter().find(|c| c.command.contains("pull")).unwrap();
    assert!(!pull.sourced);
    assert_eq!(pull.timeout, Duration::from_secs(30));
    assert!(calls.iter().all(|c| c.cwd.as_deref() == Some(repo.path())));
}

#[tokio::test]
async fn already_on_branch_skips_checkout() {
    let (repo, _) = repo_with_artifact();
    let runner = runner_on("sit");

    assert!(task(repo.path()).execute(&runner, false).await);
    assert!(!runner.executed().iter().any(|c| c.contains("checkout")));
}

#[tokio::test]
async fn dirty_tree_aborts_before_mutating() {
    let (repo, _) = repo_with_artifact();
    let runner = runner_on("main");
    runner.respond("status", FakeResponse::ok(" M src/main.rs\n"));

    assert!(!task(repo.path()).execute(&runner, false).await);
    assert_eq!(runner.executed().len(), 1);
}

#[tokio::test]
async fn pull_failure_stops_later_stages() {
    let (repo, _) = repo_with_artifact();
    let runner = runner_on("main");
    runner.respond("git pull", FakeResponse::exit(1, "Not possible to fast-forward"));

    assert!(!task(repo.path()).execute(&runner, false).await);

    let executed = runner.executed();
    assert_eq!(executed.last().unwrap(), "git pull --ff-only origin sit");
    assert!(!executed.iter().any(|c| c.contains("build") || c.contains("scp-sit")));
}

#[tokio::test]
async fn verify_failure_prevents_upload() {
    let (repo, _) = repo_with_artifact();
    let runner = runner_on("sit");
    runner.respond("apptest", FakeResponse::exit(2, "3 tests failed"));

    assert!(!task(repo.path()).execute(&runner, false).await);
    assert!(!runner.executed().iter().any(|c| c.contains("scp-sit")));
}

#[tokio::test]
async fn missing_artifact_fails_before_upload() {
    let repo = tempfile::tempdir().unwrap();
    let runner = runner_on("sit");

    assert!(!task(repo.path()).execute(&runner, false).await);

    let executed = runner.executed();
    assert_eq!(executed.last().unwrap(), "apptest");
}

#[tokio::test]
async fn missing_repo_fails_without_running_anything() {
    let runner = runner_on("sit");

    assert!(
        !task(Path::new("/nonexistent/tickr/repo"))
            .execute(&runner, false)
            .await
    );
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn dry_run_has_no_side_effects_and_succeeds() {
    // No artifact on disk: the pattern stands in for the upload argument
    let repo = tempfile::tempdir().unwrap();
    let runner = runner_on("main");

    assert!(task(repo.path()).execute(&runner, true).await);

    let placeholder = repo.path().join("be-iads-*.tar.gz").display().to_string();
    assert!(runner.executed().is_empty());
    let calls = runner.calls();
    assert!(calls.iter().all(|c| c.dry_run));
    assert!(calls
        .iter()
        .any(|c| c.command == format!("scp-sit {}", quote(&placeholder))));
}

#[tokio::test]
async fn prepare_runs_first_through_sourced_profile() {
    let (repo, _) = repo_with_artifact();
    let runner = runner_on("sit");
    let mut t = task(repo.path());
    t.prepare = Some(CommandLine::from("scb5g"));

    assert!(t.execute(&runner, false).await);

    let first = &runner.calls()[0];
    assert_eq!(first.command, "scb5g");
    assert!(first.sourced);
}

#[test]
fn validate_rejects_unbound_artifact_placeholder() {
    let mut t = task(Path::new("/repo"));
    assert!(t.validate().is_ok());

    t.artifact = None;
    assert!(t.validate().unwrap_err().contains("{artifact}"));
}

#[test]
fn decodes_from_module_params() {
    let module = ModuleRef::new("git-sync-ship")
        .with_param("repo", "~/work/shacom-backend")
        .with_param("branch", "sit")
        .with_param("build_timeout", "30m")
        .with_param("upload", "scp-sit {artifact}")
        .with_param("artifact", "be-iads-*.tar.gz");

    let t: GitSyncShip = module.params().unwrap();
    assert_eq!(t.remote, "origin");
    assert_eq!(t.build_timeout, Some(Duration::from_secs(1800)));
    assert_eq!(t.timeout, None);
    assert!(t.validate().is_ok());
}
