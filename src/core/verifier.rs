//! Matching a supplied digest against a file's computed digests

use serde::{Serialize, Serializer};
use std::path::Path;
use tracing::{debug, info, warn};

use super::algorithm::{algorithm_label, Algorithm};
use super::digest_engine::{
    compute_bytes_digest, compute_digest_set, compute_digest_set_parallel, compute_file_digest,
    DigestSet,
};
use super::error::VerifyError;

/// Outcome of comparing a supplied digest against a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub matched: bool,
    /// Algorithm that produced the match, or on a miss the algorithm the
    /// supplied string looks like. `None` means unknown.
    #[serde(serialize_with = "serialize_label")]
    pub matched_algorithm: Option<Algorithm>,
    pub matched_digest: Option<String>,
    /// On a match: digests computed up to and including the matching one.
    /// On a miss: every digest.
    pub digest_set: DigestSet,
}

fn serialize_label<S: Serializer>(algorithm: &Option<Algorithm>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(algorithm_label(*algorithm))
}

impl VerificationResult {
    /// `matched_algorithm` as a display string, `unknown` when absent
    pub fn algorithm_label(&self) -> &'static str {
        algorithm_label(self.matched_algorithm)
    }

    fn matched(algorithm: Algorithm, digest: String, digest_set: DigestSet) -> Self {
        Self {
            matched: true,
            matched_algorithm: Some(algorithm),
            matched_digest: Some(digest),
            digest_set,
        }
    }

    fn missed(provided: &str, digest_set: DigestSet) -> Self {
        Self {
            matched: false,
            matched_algorithm: infer_algorithm(provided),
            matched_digest: None,
            digest_set,
        }
    }
}

/// Result of the top-level check: either a plain report or a verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Report(DigestSet),
    Verify {
        provided: String,
        result: VerificationResult,
    },
}

/// Guess which algorithm `provided` belongs to from its length alone.
///
/// Each candidate hashes the text of `provided` and the first one whose
/// output is as long as `provided` wins. Content is never inspected, so
/// any 64-character string is reported as sha256.
pub fn infer_algorithm(provided: &str) -> Option<Algorithm> {
    let provided_len = provided.chars().count();
    Algorithm::ALL.into_iter().find(|&algorithm| {
        compute_bytes_digest(provided.as_bytes(), algorithm).len() == provided_len
    })
}

/// Verify `path` against `provided`, stopping at the first algorithm that matches.
///
/// Comparison is case-sensitive and `provided` is used as given.
pub fn verify(path: &Path, provided: &str) -> Result<VerificationResult, VerifyError> {
    let mut digest_set = DigestSet::new();

    for algorithm in Algorithm::ALL {
        let digest = compute_file_digest(path, algorithm)?;
        digest_set.push(algorithm, digest.clone());
        if digest == provided {
            info!(path = %path.display(), %algorithm, "digest matched");
            return Ok(VerificationResult::matched(algorithm, digest, digest_set));
        }
        debug!(%algorithm, "no match");
    }

    Ok(missed(path, provided, digest_set))
}

fn missed(path: &Path, provided: &str, digest_set: DigestSet) -> VerificationResult {
    let result = VerificationResult::missed(provided, digest_set);
    warn!(
        path = %path.display(),
        inferred = result.algorithm_label(),
        "no computed digest matches the provided value"
    );
    result
}

/// Like [`verify`], but computes all digests concurrently first.
///
/// Ties resolve in canonical order, so the result equals what [`verify`]
/// returns for the same file.
pub fn verify_parallel(path: &Path, provided: &str) -> Result<VerificationResult, VerifyError> {
    let full_set = compute_digest_set_parallel(path, &Algorithm::ALL)?;

    let hit = full_set
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.digest == provided)
        .map(|(index, entry)| (index, entry.clone()));

    match hit {
        Some((index, entry)) => {
            let seen: DigestSet = full_set.iter().take(index + 1).cloned().collect();
            info!(path = %path.display(), algorithm = %entry.algorithm, "digest matched");
            Ok(VerificationResult::matched(entry.algorithm, entry.digest, seen))
        }
        None => Ok(missed(path, provided, full_set)),
    }
}

/// Run report mode or verify mode depending on whether a digest was supplied.
///
/// A `provided` that is absent or blank yields the full digest set.
pub fn evaluate(path: &Path, provided: Option<&str>, parallel: bool) -> Result<Outcome, VerifyError> {
    match provided.map(str::trim).filter(|p| !p.is_empty()) {
        None => {
            let set = if parallel {
                compute_digest_set_parallel(path, &Algorithm::ALL)?
            } else {
                compute_digest_set(path, &Algorithm::ALL)?
            };
            info!(path = %path.display(), count = set.len(), "computed digest set");
            Ok(Outcome::Report(set))
        }
        Some(provided) => {
            let result = if parallel {
                verify_parallel(path, provided)?
            } else {
                verify(path, provided)?
            };
            Ok(Outcome::Verify {
                provided: provided.to_string(),
                result,
            })
        }
    }
}
