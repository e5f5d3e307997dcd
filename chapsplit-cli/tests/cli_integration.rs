//! Integration tests for the chapsplit CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn chapsplit() -> Command {
    let mut cmd = Command::cargo_bin("chapsplit").unwrap();
    cmd.env_remove("CHAPSPLIT_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Plain-text book with `count` chapters of `length` characters each
fn write_book(dir: &Path, name: &str, count: usize, length: usize) -> String {
    let mut text = String::new();
    for i in 0..count {
        text.push_str(&format!("Chapter {}\n", i + 1));
        text.push_str(&"x".repeat(length));
        text.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_split_text_fixture() {
    let out = TempDir::new().unwrap();
    chapsplit()
        .arg("split")
        .arg("-i")
        .arg(fixture_path("novel.txt"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 chapters via heading scan"))
        .stdout(predicate::str::contains("1 succeeded, 0 failed"));

    let text = fs::read_to_string(out.path().join("novel.txt")).unwrap();
    assert!(text.contains("第一章 山中\n=================================================="));
    assert!(!text.contains("作者不详"));
}

#[test]
fn test_split_json_fixture() {
    let out = TempDir::new().unwrap();
    chapsplit()
        .arg("split")
        .arg("-i")
        .arg(fixture_path("novel.json"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 chapters via navigation"));

    assert!(out.path().join("novel.txt").is_file());
}

#[test]
fn test_split_into_parts() {
    let dir = TempDir::new().unwrap();
    let input = write_book(dir.path(), "long.txt", 6, 150);
    let out = dir.path().join("out");

    chapsplit()
        .args(["split", "-i", &input, "-o"])
        .arg(&out)
        .args(["--target-length", "200", "--small-threshold", "20", "--min-combined", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 files written"));

    for part in 1..=6 {
        assert!(out.join(format!("long_part{part:02}.txt")).is_file());
    }
}

#[test]
fn test_small_parts_merged() {
    let dir = TempDir::new().unwrap();
    let input = write_book(dir.path(), "long.txt", 6, 150);
    let out = dir.path().join("out");

    chapsplit()
        .args(["split", "-i", &input, "-o"])
        .arg(&out)
        .args(["--target-length", "200", "--small-threshold", "20", "--min-combined", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 files written"));

    assert!(out.join("long_part01-02.txt").is_file());
    assert!(out.join("long_part03-04.txt").is_file());
    assert!(out.join("long_part05-06.txt").is_file());
}

#[test]
fn test_no_split_writes_single_file() {
    let dir = TempDir::new().unwrap();
    let input = write_book(dir.path(), "long.txt", 6, 150);
    let out = dir.path().join("out");

    chapsplit()
        .args(["split", "-q", "--no-split", "--target-length", "200", "-i", &input, "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(out.join("long.txt").is_file());
    assert!(!out.join("long_part01.txt").exists());
}

#[test]
fn test_directory_input_in_parallel() {
    let dir = TempDir::new().unwrap();
    let books = dir.path().join("books");
    fs::create_dir(&books).unwrap();
    write_book(&books, "a.txt", 2, 500);
    write_book(&books, "b.txt", 2, 500);
    let out = dir.path().join("out");

    chapsplit()
        .args(["split", "--parallel", "-j", "2", "-i"])
        .arg(&books)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 succeeded"));

    assert!(out.join("a.txt").is_file());
    assert!(out.join("b.txt").is_file());
}

#[test]
fn test_failed_document_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{").unwrap();
    let good = write_book(dir.path(), "good.txt", 2, 500);
    let out = dir.path().join("out");

    chapsplit()
        .arg("split")
        .arg("-i")
        .arg(&broken)
        .args(["-i", &good, "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 documents failed"));

    assert!(out.join("good.txt").is_file());
}

#[test]
fn test_missing_input() {
    chapsplit()
        .args(["split", "-i", "does/not/exist/*.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input documents found"));
}

#[test]
fn test_scan_json_output() {
    chapsplit()
        .args(["scan", "-f", "json", "-i"])
        .arg(fixture_path("novel.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rule\": \"ordinal_chapter\""))
        .stdout(predicate::str::contains("第三章 归途"));
}

#[test]
fn test_scan_markdown_output() {
    chapsplit()
        .args(["scan", "-f", "markdown", "-i"])
        .arg(fixture_path("novel.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("| Line | Heading | Rule |"))
        .stdout(predicate::str::contains("*Total headings: 3*"));
}

#[test]
fn test_scan_with_custom_rules() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("play.txt");
    fs::write(&input, "Scene 1\nA room.\nChapter 2\nScene 2\nA garden.\n").unwrap();

    chapsplit()
        .args(["scan", "-r"])
        .arg(fixture_path("custom_rules.toml"))
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scene 2"))
        .stdout(predicate::str::contains("Chapter 2").not());
}

#[test]
fn test_list_rules() {
    chapsplit()
        .args(["list", "rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. ordinal_chapter"));
}

#[test]
fn test_list_formats() {
    chapsplit()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_validate_rule_files() {
    chapsplit()
        .args(["validate", "-r"])
        .arg(fixture_path("custom_rules.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Rules: 1"));

    chapsplit()
        .args(["validate", "-r"])
        .arg(fixture_path("bad_rules.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("unclosed"));
}

#[test]
fn test_generated_settings_are_valid() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("chapsplit.toml");

    chapsplit()
        .args(["generate-config", "-o"])
        .arg(&settings)
        .assert()
        .success();

    chapsplit()
        .args(["validate", "-c"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("Target length: 80000"));
}

#[test]
fn test_settings_file_applies() {
    let dir = TempDir::new().unwrap();
    let input = write_book(dir.path(), "long.txt", 6, 150);
    let settings = dir.path().join("settings.toml");
    fs::write(
        &settings,
        "[split]\ntarget_length = 200\nsmall_threshold = 20\nmin_combined = 250\n\n[output]\nmerge = false\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    chapsplit()
        .args(["split", "-i", &input, "-c"])
        .arg(&settings)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("long_part06.txt").is_file());
}

#[test]
fn test_version() {
    chapsplit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chapsplit"));
}
