//! Target file resolution

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::core::error::VerifyError;

/// Lexically normalize a path: drop `.` components and fold `..` into
/// the preceding component. The filesystem is not consulted, so symlinks
/// are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Normalize `path` and check that it names an existing regular file
///
/// # Returns
/// The normalized path, or `NotFound` for missing paths, directories and
/// other non-regular files
pub fn resolve_target(path: &Path) -> Result<PathBuf, VerifyError> {
    let normalized = normalize_path(path);
    match fs::metadata(&normalized) {
        Ok(metadata) if metadata.is_file() => Ok(normalized),
        Ok(_) => Err(VerifyError::NotFound { path: normalized }),
        Err(e) => Err(VerifyError::from_io(&normalized, e)),
    }
}
