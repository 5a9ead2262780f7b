//! Record extraction — one generic loop driven by a [`CategorySpec`].
//!
//! Header lines are skipped, the end-of-dump marker stops the loop, every
//! other line is matched, turned into a record and rendered. Lines that do
//! not match are counted and logged; they never stop the run.

use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, error};

use crate::category::{CategorySpec, RecordKind};
use crate::classify::classify_or_sentinel;
use crate::input::{DumpLines, Encoding};
use crate::matcher::{credit, titled};
use crate::model::{GenreAssociation, PersonCredit, PersonName, Record, TitleRecord, TitleSpan};
use crate::render::Formatter;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read line {line}: {source}")]
    Read { line: usize, source: io::Error },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Run options for one category file.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub header_lines: usize,
    pub end_of_dump: Option<String>,
    pub encoding: Encoding,
    /// Log progress every this many lines; 0 disables it.
    pub progress_every: usize,
}

impl ExtractOptions {
    pub fn for_spec(spec: &CategorySpec) -> Self {
        Self {
            header_lines: spec.header_lines,
            end_of_dump: spec.end_of_dump.map(str::to_string),
            encoding: Encoding::default(),
            progress_every: 50_000,
        }
    }
}

/// Counters for one category file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines_read: usize,
    pub records: usize,
    pub blank: usize,
    pub malformed: usize,
}

/// What became of one data line.
#[derive(Debug)]
pub enum LineOutcome<'l> {
    Record(Record<'l>),
    Blank,
    Malformed,
}

/// Match one line and build its record. `carried` is the person name of the
/// previous credit line and is updated on every parsed credit.
pub fn parse_line<'l>(kind: RecordKind, line: &'l str, carried: &mut PersonName) -> LineOutcome<'l> {
    let m = match kind.pattern().apply(line) {
        Ok(m) => m,
        Err(unmatched) if kind.skips_blank_lines() && unmatched.is_blank() => {
            return LineOutcome::Blank;
        }
        Err(_) => return LineOutcome::Malformed,
    };

    let record = match kind {
        RecordKind::Title => {
            let span = TitleSpan::from_match(&m, titled::SPAN);
            let class = classify_or_sentinel(span.name_year, span.marker);
            Record::Title(TitleRecord::new(span, class, m.group(titled::TRAILER)))
        }
        RecordKind::Genre => {
            let span = TitleSpan::from_match(&m, titled::SPAN);
            let class = classify_or_sentinel(span.name_year, span.marker);
            Record::Genre(GenreAssociation {
                span,
                class,
                genre: m.group(titled::TRAILER).unwrap_or_default(),
            })
        }
        RecordKind::Credit => {
            let person = PersonName::resolve(m.group(credit::PERSON), carried);
            carried.clone_from(&person);

            let mut span = TitleSpan::from_match(&m, credit::SPAN);
            // The span swallows the spaces before the annotations.
            span.title = span.title.trim_end();
            let class = classify_or_sentinel(span.name_year, span.marker);
            Record::Credit(PersonCredit {
                person,
                span,
                class,
                info_1: m.group(credit::INFO_1),
                info_2: m.group(credit::INFO_2),
                role: m.group(credit::ROLE),
                billing: m
                    .group(credit::BILLING)
                    .map(|b| b.trim_start_matches('<').trim_end_matches('>')),
            })
        }
    };
    LineOutcome::Record(record)
}

/// Convert a whole dump, writing rendered records to `out`.
pub fn extract<R: BufRead, W: Write>(
    spec: &CategorySpec,
    opts: &ExtractOptions,
    input: R,
    formatter: &mut dyn Formatter,
    out: &mut W,
) -> Result<Summary, ExtractError> {
    let mut summary = Summary::default();
    let mut carried = PersonName::default();

    out.write_all(formatter.preamble(spec).as_bytes())?;

    for (index, line) in DumpLines::new(input, opts.encoding).enumerate() {
        let line = line.map_err(|source| ExtractError::Read {
            line: index + 1,
            source,
        })?;
        summary.lines_read += 1;

        if index >= opts.header_lines {
            if let Some(ref marker) = opts.end_of_dump {
                if line.contains(marker.as_str()) {
                    debug!(line = index + 1, "end of dump");
                    break;
                }
            }

            match parse_line(spec.kind, &line, &mut carried) {
                LineOutcome::Record(record) => {
                    if summary.records == 0 {
                        out.write_all(formatter.rows_header(spec).as_bytes())?;
                    }
                    out.write_all(formatter.render(spec, &record).as_bytes())?;
                    summary.records += 1;
                }
                LineOutcome::Blank => summary.blank += 1,
                LineOutcome::Malformed => {
                    error!(category = spec.name, line = index + 1, text = %line, "malformed line");
                    summary.malformed += 1;
                }
            }
        }

        if opts.progress_every > 0 && summary.lines_read % opts.progress_every == 0 {
            debug!(
                category = spec.name,
                lines = summary.lines_read,
                records = summary.records,
                "progress"
            );
        }
    }

    out.write_all(formatter.epilogue(spec, summary.records).as_bytes())?;
    out.flush()?;
    Ok(summary)
}
