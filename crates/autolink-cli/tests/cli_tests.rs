//! End-to-end tests for the autolink binary

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DEFINITIONS: &str = r#"
[[definition]]
pattern = "GAN"
target = "/gan"

[[definition]]
pattern = "BigGAN"
target = "/biggan"

[[definition]]
pattern = "VAE"
target = "https://en.wikipedia.org/wiki/VAE"
"#;

const DOCUMENT: &str = r#"{
  "meta": {},
  "blocks": [
    {"t": "Para", "c": [
      {"t": "Text", "c": "BigGAN"},
      {"t": "Space"},
      {"t": "Text", "c": "extends"},
      {"t": "Space"},
      {"t": "Text", "c": "(GAN)."},
      {"t": "Space"},
      {"t": "Text", "c": "GAN"},
      {"t": "Space"},
      {"t": "Text", "c": "and"},
      {"t": "Space"},
      {"t": "Text", "c": "VAE"}
    ]}
  ]
}"#;

fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let defs = dir.path().join("definitions.toml");
    let doc = dir.path().join("doc.json");
    fs::write(&defs, DEFINITIONS).unwrap();
    fs::write(&doc, DOCUMENT).unwrap();
    (dir, defs, doc)
}

fn autolink() -> Command {
    let mut cmd = Command::cargo_bin("autolink").unwrap();
    cmd.env_remove("AUTOLINK_CONFIG");
    cmd
}

#[test]
fn test_help() {
    autolink()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_check_lists_table_longest_first() {
    let (dir, defs, _) = fixture();

    autolink()
        .current_dir(dir.path())
        .args(["check", "--definitions"])
        .arg(&defs)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("BigGAN\t/biggan\n"))
        .stderr(predicate::str::contains("3 definitions OK"));
}

#[test]
fn test_check_rejects_duplicates() {
    let dir = TempDir::new().unwrap();
    let defs = dir.path().join("defs.json");
    fs::write(&defs, r#"[["GAN", "/a"], {"pattern": "VAE", "target": "/a"}]"#).unwrap();

    autolink()
        .current_dir(dir.path())
        .arg("check")
        .arg("-d")
        .arg(&defs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate target '/a'"));
}

#[test]
fn test_link_outputs_document_and_report() {
    let (dir, defs, doc) = fixture();

    let output = autolink()
        .current_dir(dir.path())
        .arg("-d")
        .arg(&defs)
        .args(["-j", "2", "link", "--report"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let linked: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let inlines = linked["blocks"][0]["c"].as_array().unwrap();
    let links: Vec<&str> = inlines
        .iter()
        .filter(|inline| inline["t"] == "Link")
        .map(|inline| inline["c"]["target"].as_str().unwrap())
        .collect();
    assert_eq!(
        links,
        vec!["/biggan", "/gan", "https://en.wikipedia.org/wiki/VAE"]
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains(r#""links_created":3"#), "{stderr}");
    assert!(stderr.contains(r#""links_demoted":1"#), "{stderr}");
}

#[test]
fn test_link_reads_stdin_and_honours_exclusions() {
    let (dir, defs, _) = fixture();
    fs::write(
        dir.path().join("autolink.toml"),
        format!(
            "definitions = {:?}\n[exclude]\ntargets = [\"https://en.wikipedia.org/*\"]\n",
            defs.display().to_string()
        ),
    )
    .unwrap();

    autolink()
        .current_dir(dir.path())
        .arg("link")
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains("/gan"))
        .stdout(predicate::str::contains("wikipedia").not());
}

#[test]
fn test_page_is_never_linked_to_itself() {
    let (dir, defs, doc) = fixture();

    autolink()
        .current_dir(dir.path())
        .arg("-d")
        .arg(&defs)
        .args(["link", "--page", "/gan"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""target":"/gan""#).not());
}

#[test]
fn test_candidates() {
    let dir = TempDir::new().unwrap();
    let defs = dir.path().join("defs.toml");
    fs::write(&defs, DEFINITIONS).unwrap();

    autolink()
        .current_dir(dir.path())
        .arg("-d")
        .arg(&defs)
        .arg("candidates")
        .write_stdin(r#"{"blocks": [{"t": "Plain", "c": [{"t": "Text", "c": "only VAE"}]}]}"#)
        .assert()
        .success()
        .stdout("VAE\thttps://en.wikipedia.org/wiki/VAE\n")
        .stderr(predicate::str::contains("1 of 3 definitions may link"));
}
