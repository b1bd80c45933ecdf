use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn fixtures() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn frontpage(workdir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("frontpage"));
    cmd.current_dir(workdir.path())
        .env_remove("FRONTPAGE_CONFIG_FILE")
        .env("RUST_LOG", "warn")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn render_writes_the_composed_page() {
    let workdir = tempfile::tempdir().expect("tempdir");
    let output = workdir.path().join("out.html");

    frontpage(&workdir)
        .arg("render")
        .arg("--template")
        .arg(fixtures().join("index.html"))
        .arg("--sources-base")
        .arg(fixtures())
        .arg("--output")
        .arg(&output)
        .arg("--query")
        .arg("cave")
        .assert()
        .success();

    let html = fs::read_to_string(&output).expect("rendered page");
    assert!(html.contains(r#"<a href="uportal.html?id=g1" class="feature""#));
    assert!(html.contains(r#"<div id="searchResults""#));
    assert!(html.contains("display: block"));
    assert!(!html.contains("Loading games"));
}

#[test]
fn render_is_the_default_command() {
    let workdir = tempfile::tempdir().expect("tempdir");
    fs::copy(
        fixtures().join("index.html"),
        workdir.path().join("index.html"),
    )
    .expect("copy template");
    fs::create_dir_all(workdir.path().join("data")).expect("data dir");
    for name in ["content.json", "contentlinks.json"] {
        fs::copy(
            fixtures().join("data").join(name),
            workdir.path().join("data").join(name),
        )
        .expect("copy document");
    }

    frontpage(&workdir)
        .assert()
        .success()
        .stdout(contains(r#"href="portal.html?id=g2""#));
}

#[test]
fn render_survives_missing_documents() {
    let workdir = tempfile::tempdir().expect("tempdir");

    frontpage(&workdir)
        .arg("render")
        .arg("--template")
        .arg(fixtures().join("index.html"))
        .assert()
        .success()
        .stdout(contains("Loading games"));
}

#[test]
fn missing_template_fails() {
    let workdir = tempfile::tempdir().expect("tempdir");

    frontpage(&workdir)
        .arg("render")
        .arg("--template")
        .arg(workdir.path().join("absent.html"))
        .assert()
        .failure()
        .stderr(contains("application error"));
}

#[test]
fn search_prints_json_results() {
    let workdir = tempfile::tempdir().expect("tempdir");

    let assert = frontpage(&workdir)
        .arg("search")
        .arg("cave")
        .arg("--json")
        .arg("--sources-base")
        .arg(fixtures())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let results: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    let results = results.as_array().expect("array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["contentType"], "movie");
    assert_eq!(results[1]["title"], "Cave Run");
    assert_eq!(results[1]["contentType"], "game");
}

#[test]
fn search_prints_one_line_per_result() {
    let workdir = tempfile::tempdir().expect("tempdir");

    frontpage(&workdir)
        .arg("search")
        .arg("lee")
        .arg("--search-type")
        .arg("author")
        .arg("--sources-base")
        .arg(fixtures())
        .assert()
        .success()
        .stdout(contains("Sky Fort by Lee (game) -> portal.html?id=g2"))
        .stdout(contains("Mural by Lee (art) -> art/a1.html"));
}

#[test]
fn search_without_documents_fails() {
    let workdir = tempfile::tempdir().expect("tempdir");

    frontpage(&workdir)
        .arg("search")
        .arg("cave")
        .assert()
        .failure();
}
