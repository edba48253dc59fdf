//! Tests for the `autonifty` binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;

fn write(base: &Path, path: &str, content: &str) {
    let path = base.join(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A small site whose config uses a base directory relative to itself.
fn create_site(root: &Path) {
    write(root, "autonifty.yaml", "url: /\nbase_dir: .\n");
    write(
        root,
        "pages/preview.html",
        "***date %B %-d, %Y*** ***nav_prev*** ***sparkle***\n",
    );
    write(root, "comics/20240101.png", "");
    write(root, "comics/20240102.png", "");
    write(root, "comics/notes.txt", "");
}

fn autonifty() -> Command {
    Command::new(cargo_bin!("autonifty"))
}

#[test]
fn test_help_lists_commands() {
    autonifty()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("dates"));
}

#[test]
fn test_render_prints_page() {
    let dir = tempfile::tempdir().unwrap();
    create_site(dir.path());

    autonifty()
        .arg("--config")
        .arg(dir.path().join("autonifty.yaml"))
        .args(["render", "preview.html", "--date", "20240102"])
        .assert()
        .success()
        .stdout("January 2, 2024 <a href=\"/d/20240101.html\">Previous</a> sparkle\n");
}

#[test]
fn test_render_strict_reports_unknown_tags() {
    let dir = tempfile::tempdir().unwrap();
    create_site(dir.path());

    autonifty()
        .arg("--config")
        .arg(dir.path().join("autonifty.yaml"))
        .args(["render", "preview.html", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ERROR: Invalid tag! No handler named SparkleTag.",
        ));
}

#[test]
fn test_render_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    create_site(dir.path());

    autonifty()
        .arg("--config")
        .arg(dir.path().join("autonifty.yaml"))
        .args(["render", "preview.html", "--date", "2024-01-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_dates_lists_live_comics() {
    let dir = tempfile::tempdir().unwrap();
    create_site(dir.path());

    autonifty()
        .arg("--config")
        .arg(dir.path().join("autonifty.yaml"))
        .arg("dates")
        .assert()
        .success()
        .stdout(predicate::str::contains("20240101  1 file(s)"))
        .stdout(predicate::str::contains("20240102  1 file(s)"))
        .stdout(predicate::str::contains("notes").not());
}

#[test]
fn test_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    autonifty()
        .arg("--config")
        .arg(dir.path().join("nowhere.yaml"))
        .arg("dates")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
