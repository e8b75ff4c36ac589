//! Integration tests for the NotFound / AccessDenied error surface
//!
//! A failure anywhere aborts the whole call; no partial digest set is
//! ever returned.

use std::fs::File;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};
use verifinder::prelude::*;

/// Missing path fails with NotFound for every entry point
#[test]
fn test_missing_file() {
    let path = Path::new("/nonexistent/path");

    let err = compute_digest_set(path, &Algorithm::ALL).unwrap_err();
    assert!(matches!(err, VerifyError::NotFound { .. }));
    assert_eq!(err.path(), path);

    assert!(matches!(
        compute_digest_set_parallel(path, &Algorithm::ALL),
        Err(VerifyError::NotFound { .. })
    ));
    assert!(matches!(
        verify(path, "abc"),
        Err(VerifyError::NotFound { .. })
    ));
    assert!(matches!(
        evaluate(path, None, false),
        Err(VerifyError::NotFound { .. })
    ));
    assert!(matches!(resolve_target(path), Err(VerifyError::NotFound { .. })));
}

/// A path nested under a regular file does not exist
#[test]
fn test_path_below_regular_file() {
    let parent = NamedTempFile::new().unwrap();
    let path = parent.path().join("child.iso");

    assert!(matches!(resolve_target(&path), Err(VerifyError::NotFound { .. })));
    assert!(matches!(
        compute_digest_set(&path, &Algorithm::ALL),
        Err(VerifyError::NotFound { .. })
    ));
    assert!(matches!(
        verify(&path, "abc"),
        Err(VerifyError::NotFound { .. })
    ));
}

/// A symlink pointing at itself does not resolve to a file
#[cfg(unix)]
#[test]
fn test_symlink_loop() {
    let temp_dir = TempDir::new().unwrap();
    let link = temp_dir.path().join("loop.iso");
    std::os::unix::fs::symlink(&link, &link).unwrap();

    assert!(matches!(resolve_target(&link), Err(VerifyError::NotFound { .. })));
    assert!(matches!(
        compute_file_digest(&link, Algorithm::Md5),
        Err(VerifyError::NotFound { .. })
    ));
}

/// A directory is not a regular file
#[test]
fn test_directory_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    assert!(matches!(
        compute_digest_set(temp_dir.path(), &Algorithm::ALL),
        Err(VerifyError::NotFound { .. })
    ));
    assert!(matches!(
        verify_parallel(temp_dir.path(), "abc"),
        Err(VerifyError::NotFound { .. })
    ));
}

/// An empty file hashes fine
#[test]
fn test_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.bin");
    File::create(&path).unwrap();

    let set = compute_digest_set(&path, &Algorithm::ALL).unwrap();
    assert_eq!(set.get(Algorithm::Md5), Some("d41d8cd98f00b204e9800998ecf8427e"));
    assert_eq!(
        set.get(Algorithm::Sha256),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
}

/// Unreadable file fails with AccessDenied
#[cfg(unix)]
#[test]
fn test_unreadable_file() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("secret.bin");
    fs::write(&path, b"classified").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores file permissions
    if File::open(&path).is_ok() {
        return;
    }

    let err = compute_digest_set(&path, &Algorithm::ALL).unwrap_err();
    assert!(matches!(err, VerifyError::AccessDenied { .. }));
    assert!(err.to_string().contains("secret.bin"));
}
