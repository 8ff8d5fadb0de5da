//! Integration tests for site scanning

use super::test_utils::write_site;
use walrus_deploy::error::SiteError;
use walrus_deploy::hashing;
use walrus_deploy::site::{scan_directory, ScanConfig, SiteScanner};
use tempfile::TempDir;

#[test]
fn test_scan_is_deterministic_and_sorted() {
    let temp_dir = TempDir::new().unwrap();
    write_site(
        temp_dir.path(),
        &[
            ("z.txt", b"z"),
            ("index.html", b"<html></html>"),
            ("assets/app.js", b"console.log(1)"),
            ("assets/img/logo.png", b"\x89PNG"),
        ],
    );

    let first = scan_directory(temp_dir.path()).unwrap();
    let second = scan_directory(temp_dir.path()).unwrap();

    assert_eq!(first, second);
    let paths: Vec<&str> = first.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["assets/app.js", "assets/img/logo.png", "index.html", "z.txt"]
    );
}

#[test]
fn test_scan_entry_fields() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("css/site.css", b"body{}"), ("data.bin", b"\0\x01")]);

    let entries = scan_directory(temp_dir.path()).unwrap();

    let css = &entries[0];
    assert_eq!(css.path, "css/site.css");
    assert_eq!(css.size, 6);
    assert_eq!(css.hash, hashing::digest(b"body{}"));
    assert_eq!(css.media_type, "text/css");

    let bin = &entries[1];
    assert_eq!(bin.media_type, "application/octet-stream");
}

#[test]
fn test_size_is_byte_length_for_large_and_multibyte_files() {
    let temp_dir = TempDir::new().unwrap();
    let long_name = format!("{}.txt", "n".repeat(200));
    let big = vec![b'x'; 256 * 1024 + 3];
    let multibyte = "héllo wörld ✓".as_bytes().to_vec();
    write_site(
        temp_dir.path(),
        &[(long_name.as_str(), big.as_slice()), ("utf8.txt", multibyte.as_slice())],
    );

    let entries = scan_directory(temp_dir.path()).unwrap();
    let by_path = |p: &str| entries.iter().find(|e| e.path == p).unwrap().size;

    assert_eq!(by_path(&long_name), big.len() as u64);
    assert_eq!(by_path("utf8.txt"), multibyte.len() as u64);
}

#[test]
fn test_empty_directory_scans_to_nothing() {
    let temp_dir = TempDir::new().unwrap();
    assert!(scan_directory(temp_dir.path()).unwrap().is_empty());
}

#[test]
fn test_missing_root_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = scan_directory(&temp_dir.path().join("missing"));
    assert!(matches!(result, Err(SiteError::Io { .. })));
}

#[test]
fn test_ignored_directories_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write_site(
        temp_dir.path(),
        &[
            ("index.html", b"hi"),
            (".git/HEAD", b"ref"),
            ("node_modules/x/index.js", b"x"),
        ],
    );

    let scanner = SiteScanner::with_config(
        temp_dir.path(),
        ScanConfig {
            ignore: vec![".git".to_string(), "node_modules".to_string()],
        },
    );
    let entries = scanner.scan().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "index.html");
}

#[cfg(unix)]
#[test]
fn test_symlinked_files_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("real.txt", b"real")]);
    std::os::unix::fs::symlink(
        temp_dir.path().join("real.txt"),
        temp_dir.path().join("alias.txt"),
    )
    .unwrap();

    let entries = scan_directory(temp_dir.path()).unwrap();
    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["real.txt"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_names_equal_after_normalization_abort_scan() {
    let temp_dir = TempDir::new().unwrap();
    // Precomposed and decomposed spellings are distinct files on Linux
    write_site(
        temp_dir.path(),
        &[("caf\u{e9}.html", b"one"), ("cafe\u{301}.html", b"two")],
    );

    match scan_directory(temp_dir.path()) {
        Err(SiteError::DuplicatePath(path)) => assert_eq!(path, "caf\u{e9}.html"),
        other => panic!("expected DuplicatePath, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts_scan() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    write_site(temp_dir.path(), &[("a.html", b"ok"), ("locked.html", b"secret"), ("z.html", b"ok")]);
    let locked = temp_dir.path().join("locked.html");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through mode bits; nothing to check then
    if std::fs::read(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let result = scan_directory(temp_dir.path());
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();

    match result {
        Err(SiteError::Io { path, .. }) => assert_eq!(path, locked),
        other => panic!("expected Io error, got {:?}", other),
    }
}
