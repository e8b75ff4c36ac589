use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use verifinder::logging::init_logging;
use verifinder::prelude::*;

#[derive(Parser)]
#[command(name = "verifinder")]
#[command(about = "Compute file digests and verify a file against an expected hash", long_about = None)]
struct Cli {
    /// File to hash (prompted for when omitted)
    file: Option<PathBuf>,

    /// Expected digest to verify against (hex, any supported algorithm)
    #[arg(short, long)]
    digest: Option<String>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hash with all algorithms concurrently
    #[arg(short, long)]
    parallel: bool,

    /// Number of worker threads for --parallel (default: number of CPUs)
    #[arg(short, long, requires = "parallel")]
    workers: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Run in batch mode (no interactive prompts)
    #[arg(long)]
    batch: bool,
}

/// Exit status for a report or a matched digest
const EXIT_OK: u8 = 0;
/// Exit status when the supplied digest matched nothing
const EXIT_MISMATCH: u8 = 1;
/// Exit status for missing/unreadable files and other fatal errors
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            match e.downcast_ref::<VerifyError>() {
                Some(VerifyError::NotFound { path }) => {
                    eprintln!("File not found: {}", path.display())
                }
                Some(VerifyError::AccessDenied { path, source }) => {
                    eprintln!("Permission denied: {} ({})", path.display(), source)
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    if let (true, Some(workers)) = (cli.parallel, cli.workers) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to build thread pool")?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let file = match &cli.file {
        Some(file) => file.clone(),
        None if cli.batch => anyhow::bail!("No file path provided"),
        None => {
            let answer = prompt(&mut input, "Enter the file path: ")?;
            if answer.is_empty() {
                println!("No file path provided. Exiting...");
                return Ok(EXIT_OK);
            }
            PathBuf::from(answer)
        }
    };

    let path = resolve_target(&file)?;
    debug!(path = %path.display(), "resolved target");

    let provided = match &cli.digest {
        Some(digest) => Some(digest.trim().to_string()),
        None if cli.batch || cli.file.is_some() => None,
        None => Some(prompt(&mut input, "Enter the hash value to verify (leave empty to skip): ")?),
    };

    let outcome = evaluate(&path, provided.as_deref(), cli.parallel)?;
    write_report(cli.output.as_deref(), &path, &outcome, cli.json)?;

    if let Some(output) = &cli.output {
        println!("Report saved to: {}", output.display());
    }

    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Verify { result, .. } if !result.matched => EXIT_MISMATCH,
        _ => EXIT_OK,
    }
}

/// Print `message` and read one trimmed line from `input`
fn prompt<R: BufRead>(input: &mut R, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
