// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn quote_leaves_safe_words_alone() {
    assert_eq!(quote("scp-sit"), "scp-sit");
    assert_eq!(quote("/out/be-iads-1.2.tar.gz"), "/out/be-iads-1.2.tar.gz");
    assert_eq!(quote("--count"), "--count");
}

#[test]
fn quote_wraps_unsafe_words() {
    assert_eq!(quote(""), "''");
    assert_eq!(quote("two words"), "'two words'");
    assert_eq!(quote("$(rm -rf)"), "'$(rm -rf)'");
    assert_eq!(quote("it's"), r"'it'\''s'");
}

#[test]
fn composite_sources_rc_then_runs_shell_string() {
    let profile = ShellProfile::new("zsh", "/home/dev/.zshrc");
    assert_eq!(
        profile.composite(&CommandLine::from("scb5g")),
        "source /home/dev/.zshrc >/dev/null 2>&1; scb5g"
    );
}

#[test]
fn composite_quotes_argv_into_one_string() {
    let profile = ShellProfile::new("bash", "/etc/rc file");
    let line = CommandLine::Argv(vec!["scp-sit".into(), "/out/my image.tar.gz".into()]);
    assert_eq!(
        profile.composite(&line),
        "source '/etc/rc file' >/dev/null 2>&1; scp-sit '/out/my image.tar.gz'"
    );
}

#[test]
fn sourced_command_invokes_profile_shell() {
    let profile = ShellProfile::new("zsh", "/home/dev/.zshrc");
    let cmd = profile.command(&CommandLine::from("apptest"), true).unwrap();
    let std = cmd.as_std();
    assert_eq!(std.get_program(), "zsh");
    let args: Vec<_> = std.get_args().collect();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0], "-c");
}

#[test]
fn plain_argv_is_spawned_directly() {
    let profile = ShellProfile::default();
    let line = CommandLine::Argv(vec!["git".into(), "fetch".into(), "origin".into()]);
    let cmd = profile.command(&line, false).unwrap();
    assert_eq!(cmd.as_std().get_program(), "git");
    assert_eq!(cmd.as_std().get_args().count(), 2);
}

#[test]
fn plain_shell_string_goes_through_sh() {
    let profile = ShellProfile::default();
    let cmd = profile
        .command(&CommandLine::from("echo hi && echo there"), false)
        .unwrap();
    assert_eq!(cmd.as_std().get_program(), "sh");
}

#[test]
fn empty_argv_builds_nothing() {
    let profile = ShellProfile::default();
    assert!(profile.command(&CommandLine::Argv(vec![]), false).is_none());
}
