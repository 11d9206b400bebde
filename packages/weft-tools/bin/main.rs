#![cfg(feature = "cli")]

use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use weft::Report;
use weft_tools::{generate_discovery_index, process_directory};

fn main() -> ExitCode {
    // Parse the CLI options (a usage error exits with code 2 here)
    let opts = Options::parse();

    match run(opts) {
        Ok(report) => {
            if report.has_errors() {
                eprintln!(
                    "Build failed with {} error(s), {} warning(s).",
                    report.errors(),
                    report.warnings()
                );
                ExitCode::from(1)
            } else {
                eprintln!("Build complete with {} warning(s).", report.warnings());
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(opts: Options) -> Result<Report, anyhow::Error> {
    if !opts.input_dir.is_dir() {
        bail!(
            "input directory {} does not exist or is not a directory",
            opts.input_dir.display()
        );
    }

    let mut report = Report::new();

    // The mirror pass: HTML files are expanded, everything else copied
    process_directory(&opts.input_dir, &opts.output_dir, &mut report);

    // The secondary pass re-reads the *input* tree for per-document metadata
    let index_path = opts.output_dir.join("search-index.json");
    generate_discovery_index(&opts.input_dir, &index_path, &mut report);

    Ok(report)
}

/// Expands user-authored component tags across a static site: the input directory is
/// mirrored into the output directory with `<def-*>` definitions applied to their
/// invocations, non-HTML files copied verbatim, and a JSON discovery index of per-document
/// metadata written alongside the output
#[derive(Parser, Debug)]
struct Options {
    /// The directory tree to process
    input_dir: PathBuf,
    /// The directory to mirror processed output into (created if missing)
    output_dir: PathBuf,
}
