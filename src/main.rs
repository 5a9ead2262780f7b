//! imdb-lists — convert IMDb list dumps into TSV, JSON lines, or SQL.
//!
//! `imdb-lists -i lists/ -o out/ -m sql movies genres`

use anyhow::{bail, Context, Result};
use clap::Parser;
use imdb_lists::driver::{parse_header_override, run_batch, Settings};
use imdb_lists::{Category, Encoding, OutputMode};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "imdb-lists",
    about = "Convert IMDb plain-text list dumps into TSV, JSON lines, or SQL"
)]
struct Cli {
    /// Categories to convert, in order (movies, genres, actors, actresses).
    /// Defaults to all of them.
    categories: Vec<String>,

    /// Directory holding the *.list dumps
    #[arg(short = 'i', long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory for the converted files (created if missing)
    #[arg(short = 'o', long, default_value = "out")]
    output_dir: PathBuf,

    /// Output mode: tsv (default), json, sql
    #[arg(short = 'm', long, default_value = "tsv")]
    mode: String,

    /// Field separator for tsv mode
    #[arg(short = 's', long, default_value = "\t")]
    separator: char,

    /// Input encoding: latin1 (default) or utf8
    #[arg(long, default_value = "latin1")]
    encoding: String,

    /// Override a category's header size, e.g. --header-lines genres=380.
    /// Can be specified multiple times.
    #[arg(long = "header-lines", value_name = "CATEGORY=N")]
    header_lines: Vec<String>,

    /// Log progress every N lines (0 disables)
    #[arg(long, default_value_t = 50_000)]
    progress_every: usize,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    debug!(?cli, "arguments parsed");

    let settings = settings_from(&cli)?;

    let names: Vec<String> = if cli.categories.is_empty() {
        Category::ALL.iter().map(|c| c.name().to_string()).collect()
    } else {
        cli.categories.clone()
    };

    let report = run_batch(&names, &settings);
    if report.failed() > 0 {
        bail!(
            "{} of {} categories failed",
            report.failed(),
            report.categories.len()
        );
    }
    Ok(())
}

/// Priority: RUST_LOG > --quiet > --verbose > info.
fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Mode, encoding and overrides are checked before any category runs.
fn settings_from(cli: &Cli) -> Result<Settings> {
    let mode: OutputMode = cli.mode.parse()?;
    let encoding: Encoding = cli.encoding.parse()?;
    let header_overrides = cli
        .header_lines
        .iter()
        .map(|arg| parse_header_override(arg))
        .collect::<Result<Vec<_>>>()
        .context("invalid --header-lines")?;

    let mut settings = Settings::new(&cli.input_dir, &cli.output_dir, mode);
    settings.separator = cli.separator;
    settings.encoding = encoding;
    settings.header_overrides = header_overrides;
    settings.progress_every = cli.progress_every;
    Ok(settings)
}
