use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use image_inventory::prelude::*;

#[derive(Parser)]
#[command(name = "image_inventory")]
#[command(about = "Fingerprint image folders and gather files without overwriting", long_about = None)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory recursively and print an inventory report
    Scan {
        /// Directory to scan
        directory: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run in batch mode (no progress spinner)
        #[arg(long)]
        batch: bool,
    },

    /// Fingerprint one file and copy it into a folder
    Copy {
        /// File to copy
        file: PathBuf,

        /// Existing destination folder
        destination: PathBuf,
    },

    /// Scan a directory and copy every file into one folder, stopping at the first failure
    Collect {
        /// Directory to scan
        directory: PathBuf,

        /// Existing destination folder
        destination: PathBuf,

        /// Run in batch mode (no progress bar)
        #[arg(long)]
        batch: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan {
            directory,
            json,
            output,
            batch,
        } => run_scan(&directory, json, output.as_deref(), batch),
        Command::Copy { file, destination } => run_copy(&file, &destination),
        Command::Collect {
            directory,
            destination,
            batch,
        } => run_collect(&directory, &destination, batch),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_scan(directory: &Path, json: bool, output: Option<&Path>, batch: bool) -> Result<()> {
    let fingerprints = scan_with_spinner(directory, batch)?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).context("Failed to create report file")?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if json {
        write_json_report(&mut out, &fingerprints)?;
    } else {
        write_report(&mut out, directory, &fingerprints)?;
    }
    out.flush()?;

    if let Some(path) = output {
        eprintln!("Report for {} file(s) saved to: {:?}", fingerprints.len(), path);
    }
    Ok(())
}

fn run_copy(file: &Path, destination: &Path) -> Result<()> {
    let fingerprint = fingerprint_file(file)
        .with_context(|| format!("Failed to fingerprint {}", file.display()))?;
    let copied = copy_to(&fingerprint, destination)
        .with_context(|| format!("Failed to copy {}", file.display()))?;

    println!("{}  {}", fingerprint.hash(), copied.display());
    Ok(())
}

fn run_collect(directory: &Path, destination: &Path, batch: bool) -> Result<()> {
    let fingerprints = scan_with_spinner(directory, batch)?;
    if fingerprints.is_empty() {
        println!("No files found in the specified directory.");
        return Ok(());
    }

    let progress = if batch {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(fingerprints.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    };

    for fingerprint in &fingerprints {
        progress.set_message(fingerprint.name().to_string());
        copy_to(fingerprint, destination)
            .with_context(|| format!("Failed to copy {}", fingerprint.path().display()))?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    println!(
        "Copied {} file(s) into {}",
        fingerprints.len(),
        destination.display()
    );
    Ok(())
}

fn scan_with_spinner(directory: &Path, batch: bool) -> Result<Vec<FileFingerprint>> {
    let progress = if batch {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} file(s) hashed {msg}")
                .context("Invalid progress spinner template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let result = scan_directory_with(directory, |fp| {
        progress.inc(1);
        progress.set_message(fp.name().to_string());
    });
    progress.finish_and_clear();

    result.with_context(|| format!("Failed to scan {}", directory.display()))
}
