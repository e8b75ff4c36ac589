//! Errors raised by the digest engine

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal failure of a digest or verification call.
///
/// No partial results accompany either variant.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Path does not exist or is not a regular file
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// File exists but could not be opened or read
    #[error("access denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl VerifyError {
    /// Classify an I/O error raised while resolving or opening `path`.
    ///
    /// Errors meaning "no file at this path" (missing component, a file used
    /// as a directory, malformed name, symlink loop) are `NotFound`. The rest,
    /// permission errors included, are `AccessDenied`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if names_missing_file(&err) {
            VerifyError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            VerifyError::read_failed(path, err)
        }
    }

    /// An I/O error raised while reading an already opened file
    pub fn read_failed(path: &Path, err: io::Error) -> Self {
        VerifyError::AccessDenied {
            path: path.to_path_buf(),
            source: err,
        }
    }

    /// The offending path
    pub fn path(&self) -> &Path {
        match self {
            VerifyError::NotFound { path } | VerifyError::AccessDenied { path, .. } => path,
        }
    }
}

fn names_missing_file(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::InvalidFilename
            | io::ErrorKind::InvalidInput
    ) || is_symlink_loop(err)
}

#[cfg(unix)]
fn is_symlink_loop(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ELOOP)
}

#[cfg(not(unix))]
fn is_symlink_loop(_err: &io::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let err = VerifyError::from_io(Path::new("/x"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, VerifyError::NotFound { .. }));
        assert_eq!(err.path(), Path::new("/x"));
    }

    #[test]
    fn test_other_kinds_are_access_denied() {
        for kind in [io::ErrorKind::PermissionDenied, io::ErrorKind::UnexpectedEof] {
            let err = VerifyError::from_io(Path::new("/y"), io::Error::from(kind));
            assert!(matches!(err, VerifyError::AccessDenied { .. }));
        }
    }

    #[test]
    fn test_unresolvable_paths_are_not_found() {
        for kind in [
            io::ErrorKind::NotADirectory,
            io::ErrorKind::InvalidFilename,
            io::ErrorKind::InvalidInput,
        ] {
            let err = VerifyError::from_io(Path::new("/z"), io::Error::from(kind));
            assert!(matches!(err, VerifyError::NotFound { .. }), "{:?}", kind);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_not_found() {
        let err = VerifyError::from_io(Path::new("/loop"), io::Error::from_raw_os_error(libc::ELOOP));
        assert!(matches!(err, VerifyError::NotFound { .. }));
    }

    #[test]
    fn test_read_failure_is_access_denied() {
        let err = VerifyError::read_failed(Path::new("/r"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, VerifyError::AccessDenied { .. }));
    }

    #[test]
    fn test_message_names_path() {
        let err = VerifyError::NotFound {
            path: PathBuf::from("/tmp/missing.iso"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.iso");
    }
}
