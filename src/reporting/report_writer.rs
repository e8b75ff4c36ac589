//! Report writing functionality

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::core::algorithm::algorithm_label;
use crate::core::digest_engine::{DigestEntry, DigestSet};
use crate::core::verifier::Outcome;

const TYPE_WIDTH: usize = 10;

/// Machine-readable form of an [`Outcome`]
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    file: String,
    mode: &'static str,
    digests: &'a DigestSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    provided: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_algorithm: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_digest: Option<&'a str>,
}

fn write_table<'a, W, I>(out: &mut W, heading: &str, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    writeln!(out, "{:<width$} {}", "Hash Type", heading, width = TYPE_WIDTH)?;
    writeln!(out, "{:-<width$} {:-<len$}", "", "", width = TYPE_WIDTH, len = heading.len())?;
    for (name, value) in rows {
        writeln!(out, "{:<width$} {}", name, value, width = TYPE_WIDTH)?;
    }
    Ok(())
}

fn entry_rows(set: &DigestSet) -> impl Iterator<Item = (&str, &str)> {
    set.iter()
        .map(|DigestEntry { algorithm, digest }| (algorithm.name(), digest.as_str()))
}

/// Write an outcome as plain text tables
///
/// # Arguments
/// * `out` - Destination writer
/// * `file` - The file that was hashed
/// * `outcome` - Report or verification outcome
pub fn write_text_report<W: Write>(out: &mut W, file: &Path, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Report(set) => {
            writeln!(out, "Computed hash values for {}", file.display())?;
            writeln!(out)?;
            write_table(out, "Computed Hash Value", entry_rows(set))?;
        }
        Outcome::Verify { provided, result } if result.matched => {
            let label = result.algorithm_label();
            let actual = result.matched_digest.as_deref().unwrap_or_default();

            writeln!(out, "Verifying {} with the provided hash...", file.display())?;
            writeln!(out)?;
            write_table(out, "Provided Hash Value", [(label, provided.as_str())])?;
            writeln!(out)?;
            write_table(out, "Actual File Hash Value", [(label, actual)])?;
            writeln!(out)?;
            writeln!(out, "Verification successful: the file hash matches ({}).", label)?;
        }
        Outcome::Verify { provided, result } => {
            writeln!(out, "Verifying {} with the provided hash...", file.display())?;
            writeln!(out)?;
            writeln!(out, "Verification failed: no matching hash found.")?;
            writeln!(out)?;
            write_table(out, "Provided Hash Value", [(result.algorithm_label(), provided.as_str())])?;
            writeln!(out)?;
            write_table(out, "Actual File Hash Values", entry_rows(&result.digest_set))?;
        }
    }
    Ok(())
}

/// Write an outcome as pretty-printed JSON
pub fn write_json_report<W: Write>(out: &mut W, file: &Path, outcome: &Outcome) -> Result<()> {
    let report = match outcome {
        Outcome::Report(set) => JsonReport {
            file: file.display().to_string(),
            mode: "report",
            digests: set,
            provided: None,
            matched: None,
            matched_algorithm: None,
            matched_digest: None,
        },
        Outcome::Verify { provided, result } => JsonReport {
            file: file.display().to_string(),
            mode: "verify",
            digests: &result.digest_set,
            provided: Some(provided),
            matched: Some(result.matched),
            matched_algorithm: Some(algorithm_label(result.matched_algorithm)),
            matched_digest: result.matched_digest.as_deref(),
        },
    };

    serde_json::to_writer_pretty(&mut *out, &report).context("Failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

/// Write an outcome to `output_path`, or to stdout when no path is given
///
/// # Arguments
/// * `output_path` - Optional report file, created or truncated
/// * `file` - The file that was hashed
/// * `outcome` - Report or verification outcome
/// * `json` - Emit JSON instead of text tables
pub fn write_report(
    output_path: Option<&Path>,
    file: &Path,
    outcome: &Outcome,
    json: bool,
) -> Result<()> {
    let mut sink: Box<dyn Write> = match output_path {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create report file {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    if json {
        write_json_report(&mut sink, file, outcome)?;
    } else {
        write_text_report(&mut sink, file, outcome)?;
    }
    sink.flush()?;
    Ok(())
}
