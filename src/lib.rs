//! File integrity verifier library
//!
//! Computes MD5, SHA-1 and SHA-2 digests of a file and checks a supplied
//! digest against all of them.

pub mod core;
pub mod logging;
pub mod reporting;
pub mod scanner;

pub use crate::core::{digest_engine, verifier};
pub use crate::reporting::report_writer;
pub use crate::scanner::target;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::algorithm::{algorithm_label, Algorithm, UNKNOWN_ALGORITHM};
    pub use crate::core::digest_engine::{
        compute_bytes_digest, compute_digest, compute_digest_chunked, compute_digest_set,
        compute_digest_set_parallel, compute_file_digest, DigestEntry, DigestSet, CHUNK_SIZE,
    };
    pub use crate::core::error::VerifyError;
    pub use crate::core::verifier::{
        evaluate, infer_algorithm, verify, verify_parallel, Outcome, VerificationResult,
    };
    pub use crate::reporting::report_writer::{write_json_report, write_report, write_text_report};
    pub use crate::scanner::target::{normalize_path, resolve_target};
}
