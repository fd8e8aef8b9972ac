// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for the relay-demo binary
//!
//! These invoke the binary and verify stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn demo() -> Command {
    let mut cmd = Command::cargo_bin("relay-demo").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn runs_every_section_by_default() {
    let assert = demo().assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let headers: Vec<&str> = stdout.lines().filter(|l| l.starts_with("== ")).collect();
    similar_asserts::assert_eq!(
        headers,
        vec![
            "== replace",
            "== add",
            "== remove",
            "== clear",
            "== bind",
            "== prune",
            "== duplicate",
        ]
    );
}

#[test]
fn add_section_collects_results_in_order() {
    demo()
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("  unary(7) -> [7, 49]"))
        .stdout(predicate::str::contains(
            "  mixed(2, 0.5, \"hi\", true) -> [2.5]",
        ));
}

#[test]
fn clear_section_leaves_no_results() {
    demo()
        .arg("clear")
        .assert()
        .success()
        .stdout("== clear\nunary has 2 listeners\nunary.remove_all()\n  unary(3) -> []\n");
}

#[test]
fn receiver_id_flag_names_receivers() {
    demo()
        .args(["bind", "--receiver-id", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo 42 press #1"))
        .stdout(predicate::str::contains("foo 5").not());
}

#[test]
fn sections_run_in_requested_order() {
    let assert = demo().args(["clear", "replace"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let clear = stdout.find("== clear").unwrap();
    let replace = stdout.find("== replace").unwrap();
    assert!(clear < replace);
    assert!(!stdout.contains("== bind"));
}

#[test]
fn quiet_by_default() {
    demo().arg("prune").assert().success().stderr("");
}

#[test]
fn debug_logging_reports_pruned_listener() {
    demo()
        .arg("prune")
        .env("RUST_LOG", "relay_core=debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("pruned listener with dropped receiver"))
        .stderr(predicate::str::contains("prune"));
}

#[test]
fn unknown_section_is_rejected() {
    demo()
        .arg("teleport")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'teleport'"));
}
