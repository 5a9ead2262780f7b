//! Batch driver. Runs categories in the given order.
//!
//! A category that cannot be set up (unknown name, missing input, output
//! not writable) is logged and skipped; the rest still run.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

use crate::category::Category;
use crate::extract::{extract, ExtractOptions, Summary};
use crate::input::Encoding;
use crate::render::{create_formatter, OutputMode};

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: OutputMode,
    pub separator: char,
    pub encoding: Encoding,
    /// Header sizes that replace the built-in ones.
    pub header_overrides: Vec<(Category, usize)>,
    pub progress_every: usize,
}

impl Settings {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, mode: OutputMode) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            mode,
            separator: '\t',
            encoding: Encoding::default(),
            header_overrides: Vec::new(),
            progress_every: 50_000,
        }
    }

    fn options_for(&self, category: Category) -> ExtractOptions {
        let mut opts = ExtractOptions::for_spec(category.spec());
        if let Some((_, n)) = self
            .header_overrides
            .iter()
            .rev()
            .find(|(c, _)| *c == category)
        {
            opts.header_lines = *n;
        }
        opts.encoding = self.encoding;
        opts.progress_every = self.progress_every;
        opts
    }
}

/// Parse a `CATEGORY=N` header override.
pub fn parse_header_override(arg: &str) -> Result<(Category, usize)> {
    let (name, count) = arg
        .split_once('=')
        .with_context(|| format!("expected CATEGORY=N, got {}", arg))?;
    let category: Category = name.trim().parse()?;
    let count = count
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid header line count in {}", arg))?;
    Ok((category, count))
}

/// Outcome of one batch entry.
#[derive(Debug)]
pub struct CategoryReport {
    pub name: String,
    pub result: Result<Summary, String>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub categories: Vec<CategoryReport>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.categories.iter().filter(|c| c.result.is_err()).count()
    }
}

/// Run `f`, logging how long it took.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    info!(
        task = label,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "finished"
    );
    value
}

/// Convert one category file into `<output_dir>/<name>.<ext>`.
pub fn run_category(category: Category, settings: &Settings) -> Result<Summary> {
    let spec = category.spec();
    let input_path = settings.input_dir.join(spec.input_file);
    let input = File::open(&input_path)
        .with_context(|| format!("failed to open {}", input_path.display()))?;

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;

    let mut formatter = create_formatter(settings.mode, settings.separator);
    let out_path = settings
        .output_dir
        .join(format!("{}.{}", spec.name, formatter.file_extension()));
    let output = File::create(&out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    let mut writer = BufWriter::new(output);

    info!(category = spec.name, input = %input_path.display(), output = %out_path.display(), "parsing");
    let opts = settings.options_for(category);
    let summary = timed(spec.name, || {
        extract(
            spec,
            &opts,
            BufReader::new(input),
            formatter.as_mut(),
            &mut writer,
        )
    })
    .with_context(|| format!("failed to convert {}", input_path.display()))?;

    info!(
        category = spec.name,
        records = summary.records,
        malformed = summary.malformed,
        "finished with {} malformed lines",
        summary.malformed
    );
    Ok(summary)
}

/// Run every named category in order. Failures are recorded, not returned.
pub fn run_batch<S: AsRef<str>>(names: &[S], settings: &Settings) -> BatchReport {
    let mut report = BatchReport::default();

    for name in names {
        let name = name.as_ref();
        let result = name
            .parse::<Category>()
            .map_err(anyhow::Error::from)
            .and_then(|category| run_category(category, settings));

        if let Err(ref e) = result {
            error!(category = name, "skipping: {:#}", e);
        }
        report.categories.push(CategoryReport {
            name: name.to_string(),
            result: result.map_err(|e| format!("{:#}", e)),
        });
    }

    info!(
        categories = report.categories.len(),
        failed = report.failed(),
        "parsing finished"
    );
    report
}
