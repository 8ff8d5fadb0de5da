//! Integration tests for the scan → manifest → diff workflow

use super::test_utils::write_site;
use std::fs;
use walrus_deploy::hashing;
use walrus_deploy::site::{compare, manifest_of, parse_manifest, scan_directory, Manifest};
use tempfile::TempDir;

#[test]
fn test_first_deploy_adds_everything() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("index.html", b"home"), ("about.html", b"about")]);

    let local = scan_directory(temp_dir.path()).unwrap();
    let diff = compare(&local, &Manifest::new());

    assert_eq!(diff.added, local);
    assert!(diff.modified.is_empty());
    assert!(diff.deleted.is_empty());
}

#[test]
fn test_redeploy_without_changes_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("index.html", b"home"), ("js/app.js", b"1")]);

    let deployed = manifest_of(&scan_directory(temp_dir.path()).unwrap());
    let diff = compare(&scan_directory(temp_dir.path()).unwrap(), &deployed);

    assert!(diff.is_empty());
}

#[test]
fn test_edit_add_and_remove_after_deploy() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_site(
        root,
        &[("index.html", b"v1"), ("style.css", b"a{}"), ("old.txt", b"bye")],
    );
    let deployed = manifest_of(&scan_directory(root).unwrap());

    fs::write(root.join("index.html"), b"v2").unwrap();
    fs::remove_file(root.join("old.txt")).unwrap();
    write_site(root, &[("blog/post.html", b"new post")]);

    let diff = compare(&scan_directory(root).unwrap(), &deployed);

    let added: Vec<&str> = diff.added.iter().map(|e| e.path.as_str()).collect();
    let modified: Vec<&str> = diff.modified.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(added, vec!["blog/post.html"]);
    assert_eq!(modified, vec!["index.html"]);
    assert_eq!(diff.deleted, vec!["old.txt".to_string()]);
    assert_eq!(diff.modified[0].hash, hashing::digest(b"v2"));
    assert_eq!(diff.upload_bytes(), 2 + 8);
}

#[test]
fn test_manifest_from_json_with_foreign_spelling() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("docs/a.md", b"a")]);
    let hash = hashing::digest(b"a").to_uppercase();

    let remote = parse_manifest(&format!(r#"{{"./docs\\a.md": "{}"}}"#, hash)).unwrap();
    let diff = compare(&scan_directory(temp_dir.path()).unwrap(), &remote);

    assert!(diff.is_empty(), "normalized keys and hashes should match: {:?}", diff);
}

#[test]
fn test_manifest_round_trips_through_json() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("index.html", b"x"), ("img/a.png", b"y")]);
    let manifest = manifest_of(&scan_directory(temp_dir.path()).unwrap());

    let json = serde_json::to_string(&manifest).unwrap();
    assert_eq!(parse_manifest(&json).unwrap(), manifest);
}
