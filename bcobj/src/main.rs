//! # bcobj
//!
//! A CLI tool for counting Business Central objects declared in AL files.
//!
//! ## Overview
//!
//! bcobj is built on top of bcobjlib. It scans a directory of `.al` files,
//! counts every object declaration by type (tables, pages, codeunits, ...)
//! and prints a summary or exports it.
//!
//! ## Usage
//!
//! ```bash
//! # Count objects under the current directory
//! bcobj
//!
//! # Only the top-level directory
//! bcobj ./app --recursive=false
//!
//! # Export JSON, Excel and PDF with a fixed base name
//! bcobj ./app --output all --file objects
//!
//! # Only tables and pages
//! bcobj ./app --type table,page
//!
//! # List supported object types
//! bcobj --list-types
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use bcobjlib::output::{write_csv, write_json, write_pdf, write_xlsx};
use bcobjlib::{scan_directory_with, FilterConfig, ObjectKind, ScanOptions, Summary, SummaryTable};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use crate::render::OutputMode;

/// Output formats selectable with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Console,
    Json,
    Xlsx,
    Pdf,
    Csv,
    All,
}

impl OutputFormat {
    fn from_arg(value: &str) -> anyhow::Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "all" => Ok(Self::All),
            other => bail!("unknown output format: {other}"),
        }
    }
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("bcobj")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count Business Central objects in AL files")
        .long_about(
            "Scans a directory for Business Central AL files and counts all object \
             types (tables, pages, codeunits, etc.).\n\n\
             Results can be printed to the console or exported to JSON, Excel, PDF and CSV.",
        )
        .arg(
            Arg::new("path")
                .help("Directory to scan (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .default_value("console")
                .ignore_case(true)
                .value_parser(["console", "json", "xlsx", "excel", "pdf", "csv", "all"])
                .help("Output format: console, json, xlsx, pdf, csv, all"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Output file name without extension (auto-generated if not specified)"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .require_equals(true)
                .default_value("true")
                .default_missing_value("true")
                .help("Scan subdirectories (use --recursive=false to disable)"),
        )
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .value_delimiter(',')
                .ignore_case(true)
                .value_parser(PossibleValuesParser::new(ObjectKind::keywords()))
                .help("Only count these object types (comma-separated)"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .default_value("1")
                .help("Number of files scanned in parallel (0 = one per CPU)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Show detailed output"),
        )
        .arg(
            Arg::new("list-types")
                .long("list-types")
                .action(ArgAction::SetTrue)
                .help("List supported object types and exit"),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Extract object kinds from matches (empty = all)
fn extract_kinds(matches: &ArgMatches) -> anyhow::Result<Vec<ObjectKind>> {
    matches
        .get_many::<String>("type")
        .map(|values| {
            values
                .map(|v| v.parse::<ObjectKind>().map_err(anyhow::Error::from))
                .collect()
        })
        .unwrap_or_else(|| Ok(Vec::new()))
}

/// Default export base name, e.g. `bc-objects-20260119-142530`
fn default_file_base() -> String {
    format!(
        "bc-objects-{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    )
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "bcobj=debug,bcobjlib=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handler for the default count command
fn count_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let format = OutputFormat::from_arg(
        matches
            .get_one::<String>("output")
            .map(|s| s.as_str())
            .unwrap_or("console"),
    )?;
    let recursive = matches.get_one::<bool>("recursive").copied().unwrap_or(true);
    let jobs = matches.get_one::<usize>("jobs").copied().unwrap_or(1);
    let verbose = matches.get_flag("verbose");
    let kinds = extract_kinds(matches)?;
    let filter = build_filter(matches)?;

    let abs_path: PathBuf =
        std::path::absolute(path).with_context(|| format!("invalid path: {path}"))?;
    if !abs_path.exists() {
        bail!("path does not exist: {}", abs_path.display());
    }

    if verbose {
        println!("Scanning: {}", abs_path.display());
        println!("Recursive: {recursive}");
    }

    tracing::debug!(?format, jobs, ?kinds, "scan options");
    let options = ScanOptions::new()
        .recursive(recursive)
        .filter(filter)
        .jobs(jobs);
    let report = scan_directory_with(&abs_path, &options).context("scan failed")?;

    if verbose {
        println!("Found {} objects", report.declarations.len());
        if !report.failures.is_empty() {
            println!("Skipped {} unreadable path(s)", report.failures.len());
        }
    }

    let summary = Summary::with_kinds(report.declarations, &kinds);
    let base = matches
        .get_one::<String>("file")
        .cloned()
        .unwrap_or_else(default_file_base);

    if matches!(format, OutputFormat::Console | OutputFormat::All) {
        let table = SummaryTable::from_summary(&summary);
        let text = render::render_summary(&table, OutputMode::Auto)
            .map_err(|e| anyhow!("failed to render summary: {e}"))?;
        print!("{text}");
    }

    if matches!(format, OutputFormat::Json | OutputFormat::All) {
        let json_file = format!("{base}.json");
        write_json(&summary, &json_file).context("failed to export JSON")?;
        println!("{}", render::exported(&json_file));
    }

    if matches!(format, OutputFormat::Xlsx | OutputFormat::All) {
        let xlsx_file = format!("{base}.xlsx");
        write_xlsx(&summary, &xlsx_file).context("failed to export Excel")?;
        println!("{}", render::exported(&xlsx_file));
    }

    if matches!(format, OutputFormat::Pdf | OutputFormat::All) {
        let pdf_file = format!("{base}.pdf");
        write_pdf(&summary, &pdf_file).context("failed to export PDF")?;
        println!("{}", render::exported(&pdf_file));
    }

    if format == OutputFormat::Csv {
        let written = write_csv(&summary, &base).context("failed to export CSV")?;
        for file in written {
            println!("{}", render::exported(&file.to_string_lossy()));
        }
    }

    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    if matches.get_flag("list-types") {
        let text = render::render_types(OutputMode::Auto)
            .map_err(|e| anyhow!("failed to render types: {e}"))?;
        print!("{text}");
        return Ok(());
    }
    count_handler(matches)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
