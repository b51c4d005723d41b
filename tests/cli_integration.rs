//! Integration tests for the twig binary.
//!
//! These tests exercise the full CLI: argument parsing, config loading,
//! script execution, and exit codes.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Get a command for running twig, isolated from any user config.
fn twig(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("twig").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("TWIG_CONFIG")
        .env_remove("XDG_CONFIG_HOME");
    cmd
}

const PRELUDE: &str = "author \"Jane Doe\" jane@example.com\n";

#[test]
fn help_flag_works() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("commit graph"));
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("twig"));
}

#[test]
fn run_from_stdin() {
    let home = TempDir::new().unwrap();
    let script = format!("{}commit first\ncommit second\nlog\n", PRELUDE);
    twig(&home)
        .args(["run", "-q"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Author: Jane Doe <jane@example.com>"))
        .stdout(predicate::str::is_match("(?s)    second.*    first").unwrap());
}

#[test]
fn run_from_file() {
    let home = TempDir::new().unwrap();
    let script = home.child("history.twig");
    script
        .write_str(&format!(
            "# feature work\n{}commit m1\nbranch feature\nswitch feature\ncommit f1\nbranches\n",
            PRELUDE
        ))
        .unwrap();

    twig(&home)
        .arg("run")
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created branch feature"))
        .stdout(predicate::str::contains("Switched to branch feature"))
        .stdout(predicate::str::contains("* feature"))
        .stdout(predicate::str::contains("  main"));
}

#[test]
fn missing_branch_fails_with_line_number() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .arg("run")
        .write_stdin("switch dev\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: line 1: branch not found: dev"));
}

#[test]
fn commit_without_author_fails() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .arg("run")
        .write_stdin("commit first\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("author is required"));
}

#[test]
fn keep_going_reports_every_failure() {
    let home = TempDir::new().unwrap();
    let script = format!("{}branch main\ncommit \"\"\ncommit ok\nhead\n", PRELUDE);
    twig(&home)
        .args(["run", "--keep-going", "-q"])
        .write_stdin(script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: invalid argument"))
        .stderr(predicate::str::contains("line 3: invalid argument"))
        .stderr(predicate::str::contains("2 of 5 instruction(s) failed"))
        .stdout(predicate::str::is_match("^[0-9a-f]{12}\n$").unwrap());
}

#[test]
fn json_log() {
    let home = TempDir::new().unwrap();
    let script = format!("{}commit first\nlog\n", PRELUDE);
    let output = twig(&home)
        .args(["--json", "run"])
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let last = stdout.lines().last().unwrap();
    let log: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(log[0]["message"], "first");
    assert_eq!(log[0]["id"].as_str().unwrap().len(), 12);
}

#[test]
fn missing_script_file_fails() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .args(["run", "does-not-exist.twig"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open script"));
}

#[test]
fn config_set_get_and_use() {
    let home = TempDir::new().unwrap();
    let config = home.child("twig.toml");

    twig(&home)
        .arg("--config")
        .arg(config.path())
        .args(["config", "set", "user.name", "Jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set user.name = Jane"));
    twig(&home)
        .arg("--config")
        .arg(config.path())
        .args(["config", "set", "user.email", "jane@example.com"])
        .assert()
        .success();

    config.assert(predicate::str::contains("jane@example.com"));

    twig(&home)
        .arg("--config")
        .arg(config.path())
        .args(["config", "get", "user.email"])
        .assert()
        .success()
        .stdout("jane@example.com\n");

    // The configured author makes an explicit `author` line unnecessary.
    twig(&home)
        .arg("--config")
        .arg(config.path())
        .args(["run", "-q"])
        .write_stdin("commit first\nlog\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Author: Jane <jane@example.com>"));
}

#[test]
fn config_default_location() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .args(["config", "set", "log.oneline", "true"])
        .assert()
        .success();

    home.child(".twig/config.toml")
        .assert(predicate::str::contains("oneline = true"));

    twig(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log.oneline = true"))
        .stdout(predicate::str::contains("user.name = (not set)"));
}

#[test]
fn config_env_path_is_write_target() {
    let home = TempDir::new().unwrap();
    let custom = home.child("custom.toml");

    twig(&home)
        .env("TWIG_CONFIG", custom.path())
        .args(["config", "set", "user.name", "Jane"])
        .assert()
        .success();

    custom.assert(predicate::str::contains("name = \"Jane\""));
    home.child(".twig/config.toml").assert(predicate::path::missing());

    twig(&home)
        .env("TWIG_CONFIG", custom.path())
        .args(["config", "get", "user.name"])
        .assert()
        .success()
        .stdout("Jane\n");
}

#[test]
fn quiet_config_set_prints_nothing() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .args(["-q", "config", "set", "log.json", "true"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn config_rejects_email_without_name() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .args(["config", "set", "user.email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed author email"));
    home.child(".twig/config.toml").assert(predicate::path::missing());
}

#[test]
fn keep_going_past_invalid_utf8() {
    let home = TempDir::new().unwrap();
    let mut script = PRELUDE.as_bytes().to_vec();
    script.extend_from_slice(b"commit a\n\xff\ncommit b\nlog\n");
    twig(&home)
        .args(["run", "--keep-going", "-q"])
        .write_stdin(script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: line 3: invalid UTF-8"))
        .stderr(predicate::str::contains("1 of 5 instruction(s) failed"))
        .stdout(predicate::str::is_match("(?s)    b.*    a").unwrap());
}

#[test]
fn config_rejects_bad_values() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .args(["config", "set", "log.json", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expects a boolean"));
    twig(&home)
        .args(["config", "get", "trunk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    twig(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("twig"));
}
