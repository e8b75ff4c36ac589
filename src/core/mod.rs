//! Digest computation and verification

pub mod algorithm;
pub mod digest_engine;
pub mod error;
pub mod verifier;

pub use algorithm::{algorithm_label, Algorithm, UNKNOWN_ALGORITHM};
pub use digest_engine::{DigestEntry, DigestSet};
pub use error::VerifyError;
pub use verifier::{Outcome, VerificationResult};
