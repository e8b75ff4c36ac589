//! Streaming digest computation over files and byte streams

use md5::Md5;
use rayon::prelude::*;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

use super::algorithm::Algorithm;
use super::error::VerifyError;

/// Read size used when streaming a file through a hasher
pub const CHUNK_SIZE: usize = 8192;

/// One computed digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestEntry {
    pub algorithm: Algorithm,
    pub digest: String,
}

/// Digests of a single file, kept in canonical algorithm order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DigestSet {
    entries: Vec<DigestEntry>,
}

impl DigestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digest. Callers push in canonical order.
    pub fn push(&mut self, algorithm: Algorithm, digest: String) {
        self.entries.push(DigestEntry { algorithm, digest });
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.algorithm == algorithm)
            .map(|e| e.digest.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DigestEntry> {
        self.entries.iter()
    }

    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.entries.iter().map(|e| e.algorithm).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<DigestEntry> for DigestSet {
    fn from_iter<I: IntoIterator<Item = DigestEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Feed `reader` through hasher `D` in `chunk_size` reads and hex-encode the result
fn hash_reader<D: Digest, R: Read>(mut reader: R, chunk_size: usize) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compute the digest of a byte stream with the default chunk size
///
/// # Arguments
/// * `reader` - Source of bytes, consumed to the end exactly once
/// * `algorithm` - Hash algorithm to apply
///
/// # Returns
/// Lowercase hex digest, or the reader's I/O error. A bare stream has no
/// path, so classification into `NotFound` / `AccessDenied` happens in
/// [`compute_file_digest`], where any failure after opening is `AccessDenied`.
pub fn compute_digest<R: Read>(reader: R, algorithm: Algorithm) -> io::Result<String> {
    compute_digest_chunked(reader, algorithm, CHUNK_SIZE)
}

/// Compute the digest of a byte stream reading `chunk_size` bytes at a time.
///
/// The result does not depend on `chunk_size`.
pub fn compute_digest_chunked<R: Read>(
    reader: R,
    algorithm: Algorithm,
    chunk_size: usize,
) -> io::Result<String> {
    match algorithm {
        Algorithm::Md5 => hash_reader::<Md5, _>(reader, chunk_size),
        Algorithm::Sha1 => hash_reader::<Sha1, _>(reader, chunk_size),
        Algorithm::Sha224 => hash_reader::<Sha224, _>(reader, chunk_size),
        Algorithm::Sha256 => hash_reader::<Sha256, _>(reader, chunk_size),
        Algorithm::Sha384 => hash_reader::<Sha384, _>(reader, chunk_size),
        Algorithm::Sha512 => hash_reader::<Sha512, _>(reader, chunk_size),
    }
}

/// Digest of an in-memory byte slice
pub fn compute_bytes_digest(bytes: &[u8], algorithm: Algorithm) -> String {
    match algorithm {
        Algorithm::Md5 => hex::encode(Md5::digest(bytes)),
        Algorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
        Algorithm::Sha224 => hex::encode(Sha224::digest(bytes)),
        Algorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
        Algorithm::Sha384 => hex::encode(Sha384::digest(bytes)),
        Algorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
    }
}

/// Open `path` for reading, rejecting anything that is not a regular file
fn open_regular_file(path: &Path) -> Result<File, VerifyError> {
    let file = File::open(path).map_err(|e| VerifyError::from_io(path, e))?;
    let metadata = file.metadata().map_err(|e| VerifyError::read_failed(path, e))?;
    if !metadata.is_file() {
        return Err(VerifyError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(file)
}

/// Compute one digest of the file at `path`
pub fn compute_file_digest(path: &Path, algorithm: Algorithm) -> Result<String, VerifyError> {
    debug!(path = %path.display(), %algorithm, "hashing file");
    let file = open_regular_file(path)?;
    compute_digest(file, algorithm).map_err(|e| VerifyError::read_failed(path, e))
}

/// Keep only the requested algorithms, in canonical order
fn canonical_subset(algorithms: &[Algorithm]) -> Vec<Algorithm> {
    Algorithm::ALL
        .into_iter()
        .filter(|a| algorithms.contains(a))
        .collect()
}

/// Compute a digest set for `path`, one full pass over the file per algorithm
///
/// # Arguments
/// * `path` - File to hash
/// * `algorithms` - Algorithms to include; duplicates are ignored and the
///   result is always in canonical order
///
/// # Returns
/// The digest set, or the first error hit. Nothing is returned for the
/// algorithms that succeeded before the failure.
pub fn compute_digest_set(path: &Path, algorithms: &[Algorithm]) -> Result<DigestSet, VerifyError> {
    let mut set = DigestSet::new();
    for algorithm in canonical_subset(algorithms) {
        let digest = compute_file_digest(path, algorithm)?;
        set.push(algorithm, digest);
    }
    Ok(set)
}

/// Same result as [`compute_digest_set`], with the per-algorithm passes run
/// on the rayon pool
pub fn compute_digest_set_parallel(
    path: &Path,
    algorithms: &[Algorithm],
) -> Result<DigestSet, VerifyError> {
    let digests: Vec<String> = canonical_subset(algorithms)
        .par_iter()
        .map(|&algorithm| compute_file_digest(path, algorithm))
        .collect::<Result<_, _>>()?;

    Ok(canonical_subset(algorithms)
        .into_iter()
        .zip(digests)
        .map(|(algorithm, digest)| DigestEntry { algorithm, digest })
        .collect())
}
