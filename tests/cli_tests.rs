use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn prints_help() {
    let mut cmd = Command::cargo_bin("appcenter").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("App Center distribution CLI in Rust"));
}

#[test]
fn distribute_requires_a_file_argument() {
    let mut cmd = Command::cargo_bin("appcenter").unwrap();
    cmd.args(["distribute", "--app", "org/app"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}
