//! Resolution of the file the user asked about

pub mod target;

pub use target::{normalize_path, resolve_target};
