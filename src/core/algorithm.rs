//! Supported hash algorithms and their canonical order

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A hash algorithm the verifier knows how to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

/// Label used when a digest cannot be attributed to any algorithm
pub const UNKNOWN_ALGORITHM: &str = "unknown";

impl Algorithm {
    /// Every supported algorithm, in canonical order.
    ///
    /// Digests are computed, displayed and searched in this order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
    ];

    /// Lowercase name, e.g. `sha256`
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Length of the hex-encoded digest in characters
    pub fn hex_len(self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha224 => 56,
            Algorithm::Sha256 => 64,
            Algorithm::Sha384 => 96,
            Algorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unsupported algorithm name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported hash algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Accepts `sha256`, `SHA256` and `sha-256` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "");
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Display name for an optional algorithm, falling back to `unknown`
pub fn algorithm_label(algorithm: Option<Algorithm>) -> &'static str {
    algorithm.map_or(UNKNOWN_ALGORITHM, Algorithm::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["md5", "sha1", "sha224", "sha256", "sha384", "sha512"]);
    }

    #[test]
    fn test_hex_lengths_are_distinct() {
        let mut lengths: Vec<_> = Algorithm::ALL.iter().map(|a| a.hex_len()).collect();
        lengths.dedup();
        assert_eq!(lengths, [32, 40, 56, 64, 96, 128]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("SHA-512".parse::<Algorithm>().unwrap(), Algorithm::Sha512);
        assert_eq!("MD5".parse::<Algorithm>().unwrap(), Algorithm::Md5);
        assert!("blake3".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_label_for_unknown() {
        assert_eq!(algorithm_label(None), "unknown");
        assert_eq!(algorithm_label(Some(Algorithm::Sha1)), "sha1");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Algorithm::Sha384).unwrap();
        assert_eq!(json, "\"sha384\"");
    }
}
