#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn digest_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("docdigest"));
    cmd.env("DOCDIGEST_HOME", home.as_os_str())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_fresh_project_lists_one_untitled_section() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Section 1  (untitled)"));
}

#[test]
fn test_add_edit_and_combine() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "Intro", "-c", "Hello there"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["add", "-t", "Install", "-c", "Run it", "--tag", "setup, cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section 2 added to default"));

    digest_cmd(home.path())
        .args(["combine"])
        .assert()
        .success()
        .stdout("## Intro\n\nHello there\n\n---\n\n## Install\n\nRun it\n");
}

#[test]
fn test_list_search_filters_by_tag_and_text() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "Alpha", "-c", "first body"])
        .assert()
        .success();
    digest_cmd(home.path())
        .args(["add", "-t", "Beta", "-c", "second body", "--tag", "release"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("#release"));

    digest_cmd(home.path())
        .args(["search", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section 2  Beta"))
        .stdout(predicate::str::contains("Alpha").not());

    digest_cmd(home.path())
        .args(["list", "-s", "nomatch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sections match \"nomatch\"."));
}

#[test]
fn test_view_shows_full_content() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "Notes", "-c", "line one\nline two"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section 1  Notes"))
        .stdout(predicate::str::contains("line one\nline two"));
}

#[test]
fn test_move_reorders_combined_output() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "A", "-c", "a"])
        .assert()
        .success();
    digest_cmd(home.path())
        .args(["add", "-t", "B", "-c", "b"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["mv", "2", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section moved 2 -> 1"));

    digest_cmd(home.path())
        .args(["combine"])
        .assert()
        .success()
        .stdout("## B\n\nb\n\n---\n\n## A\n\na\n");
}

#[test]
fn test_remove_section() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["add", "-t", "Gone"])
        .assert()
        .success();
    digest_cmd(home.path())
        .args(["rm", "2"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gone").not());
}

#[test]
fn test_projects_keep_their_own_sections() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "Default note"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["project", "add", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created and active: Work"));

    digest_cmd(home.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default note").not());

    digest_cmd(home.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout("  default\n* Work\n");

    digest_cmd(home.path())
        .args(["project", "switch", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to project default"));

    digest_cmd(home.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default note"));
}

#[test]
fn test_duplicate_project_fails() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["project", "add", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unknown_project_switch_fails() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["project", "switch", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown project: nope"));
}

#[test]
fn test_bad_position_fails() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["view", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_export_markdown_and_pdf() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "A", "-c", "B"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["export", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let md = out.path().join("default_combined_docs.md");
    assert_eq!(fs::read_to_string(md).unwrap(), "## A\n\nB");

    digest_cmd(home.path())
        .args(["export", "-f", "pdf", "-o"])
        .arg(out.path())
        .assert()
        .success();

    let pdf = fs::read(out.path().join("default_combined_docs.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_export_html_uses_configured_dir() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let target = out.path().join("exports");

    digest_cmd(home.path())
        .args(["config", "export-dir"])
        .arg(&target)
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["edit", "1", "-t", "Title", "-c", "*hi*"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["export", "--format", "html"])
        .assert()
        .success();

    let html = fs::read_to_string(target.join("default_combined_docs.html")).unwrap();
    assert!(html.contains("<h2>Title</h2>"));
    assert!(html.contains("<em>hi</em>"));
}

#[test]
fn test_theme_toggle_persists() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["theme", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    digest_cmd(home.path())
        .args(["theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to light"));

    digest_cmd(home.path())
        .args(["theme", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["config", "pdf-font-size", "12"])
        .assert()
        .success();

    digest_cmd(home.path())
        .args(["config", "pdf-font-size"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12"));

    digest_cmd(home.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pdf-font-size = 12"))
        .stdout(predicate::str::contains("export-dir = "));
}

#[test]
fn test_corrupt_store_is_reset_with_warning() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["add", "-t", "Kept"])
        .assert()
        .success();

    let sections = home.path().join("sections_default.kv");
    assert!(sections.exists());
    fs::write(&sections, "{ not json").unwrap();

    digest_cmd(home.path())
        .args(["list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable"))
        .stdout(predicate::str::contains("Kept").not());
}

#[test]
fn test_config_rejects_bad_values() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path())
        .args(["config", "pdf-font-size", "big"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pdf-font-size"));

    digest_cmd(home.path())
        .args(["config", "no-such-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: no-such-key"));
}

#[test]
fn test_corrupt_setting_is_reported_once() {
    let home = TempDir::new().unwrap();

    digest_cmd(home.path()).args(["theme"]).assert().success();
    fs::write(home.path().join("dark_mode.kv"), "maybe").unwrap();

    digest_cmd(home.path())
        .args(["theme", "--show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("dark_mode"))
        .stdout(predicate::str::contains("Theme: dark"));

    digest_cmd(home.path())
        .args(["theme", "--show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable").not());
}
