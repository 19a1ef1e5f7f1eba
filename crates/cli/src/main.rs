//! # kwitansi-cli
//!
//! Command-line front end for receipt exports and student spreadsheet imports.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use kwitansi_core::{ExportRequest, ImportMode, ImportOutcome, OutputKind, ReceiptRecord};
use kwitansi_export::{export, ExportError, ExportOptions};
use kwitansi_formatting::DateInput;
use kwitansi_import::{import_spreadsheet, MemoryStudentStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// kwitansi - receipt exports and student imports
#[derive(Parser)]
#[command(name = "kwitansi")]
#[command(author, version, about = "Receipt exports and student imports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render receipts from a JSON file as a PDF or workbook
    Export(ExportArgs),
    /// Validate and import a student spreadsheet
    Import(ImportArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// JSON array of receipt records
    #[arg(short, long, value_name = "FILE")]
    records: PathBuf,

    /// Output type ("pdf" renders a PDF, anything else a workbook)
    #[arg(short = 't', long = "type", default_value = "excel")]
    kind: String,

    /// First day of the reported period
    #[arg(long, value_parser = parse_date_arg, requires = "end")]
    start: Option<NaiveDate>,

    /// Last day of the reported period
    #[arg(long, value_parser = parse_date_arg, requires = "start")]
    end: Option<NaiveDate>,

    /// Directory the document is written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Logo drawn on PDF exports
    #[arg(long)]
    logo: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ImportArgs {
    /// Spreadsheet to import (.xlsx or .xls)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// "strict" rejects the whole file on any row error
    #[arg(short, long, default_value = "partial")]
    mode: String,

    /// Output format (json, table)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,
}

/// Output format for import results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable summary (default)
    #[default]
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match cli.command {
        Command::Export(args) => {
            let path = run_export(&args)?;
            println!("{} {}", "Wrote".green().bold(), path.display());
            Ok(())
        }
        Command::Import(args) => {
            let outcome = run_import(&args).await?;
            print_outcome(&outcome, args.format)?;
            if outcome.is_aborted() {
                bail!("import cancelled: {} row error(s)", outcome.row_errors.len());
            }
            Ok(())
        }
    }
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    value
        .to_date()
        .ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

/// Read a JSON array of receipt records.
fn load_records(path: &Path) -> Result<Vec<ReceiptRecord>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Invalid receipt records in {}", path.display()))
}

/// Render the records and write the document into the output directory.
fn run_export(args: &ExportArgs) -> Result<PathBuf> {
    let records = load_records(&args.records)?;
    let request = ExportRequest::new(records, OutputKind::from_selector(Some(&args.kind)))
        .with_range(args.start, args.end);

    let mut options = ExportOptions::default().for_today();
    if let Some(logo) = &args.logo {
        options = options.with_logo(logo);
    }

    let document = match export(&request, &options) {
        Ok(document) => document,
        Err(ExportError::EmptyDataset) => bail!("no receipts in {}", args.records.display()),
        Err(e) => return Err(e.into()),
    };

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
    let path = args.out_dir.join(&document.file_name);
    std::fs::write(&path, &document.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = document.bytes.len(), "document written");
    Ok(path)
}

/// Copy the spreadsheet into `dir`, since importing removes the file it reads.
fn stage_upload(source: &Path, dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .with_context(|| format!("Not a file: {}", source.display()))?;
    let staged = dir.join(name);
    std::fs::copy(source, &staged)
        .with_context(|| format!("Failed to read file: {}", source.display()))?;
    Ok(staged)
}

async fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let staging = tempfile::tempdir().context("Failed to create staging directory")?;
    let staged = stage_upload(&args.file, staging.path())?;
    let store = MemoryStudentStore::new();

    let outcome = import_spreadsheet(&staged, ImportMode::from_selector(Some(&args.mode)), &store)
        .await
        .with_context(|| format!("Failed to import {}", args.file.display()))?;
    Ok(outcome)
}

fn print_outcome(outcome: &ImportOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Table => {
            println!(
                "{} {} row(s) accepted ({} mode)",
                "Imported:".green().bold(),
                outcome.inserted_count(),
                outcome.mode
            );
            for row in &outcome.inserted_rows {
                println!("  {}\t{}\t{}", row.student_id, row.student_name, row.cohort);
            }
            for error in &outcome.row_errors {
                println!("{} {error}", "Error:".red().bold());
            }
        }
    }
    Ok(())
}
