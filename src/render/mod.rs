//! Output formatters — trait-based format dispatch.
//!
//! The mode is picked once per run. Each category file gets its own
//! formatter, so per-file state (the SQL first-row flag) starts fresh.

pub mod delimited;
pub mod sql;
pub mod structured;

use crate::category::CategorySpec;
use crate::model::Record;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Turns records into output text. Returned strings are written verbatim.
pub trait Formatter {
    /// Written once before any record.
    fn preamble(&self, _spec: &CategorySpec) -> String {
        String::new()
    }

    /// Written right before the first record, only if there is one.
    fn rows_header(&self, _spec: &CategorySpec) -> String {
        String::new()
    }

    fn render(&mut self, spec: &CategorySpec, record: &Record) -> String;

    /// Written once after the last record.
    fn epilogue(&self, _spec: &CategorySpec, _records: usize) -> String {
        String::new()
    }

    fn file_extension(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Delimited,
    Structured,
    Sql,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown mode: {0}. Use tsv, json, or sql")]
pub struct UnknownMode(pub String);

impl FromStr for OutputMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(OutputMode::Delimited),
            "json" => Ok(OutputMode::Structured),
            "sql" => Ok(OutputMode::Sql),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputMode::Delimited => "tsv",
            OutputMode::Structured => "json",
            OutputMode::Sql => "sql",
        })
    }
}

/// Create a fresh formatter for one category file.
pub fn create_formatter(mode: OutputMode, separator: char) -> Box<dyn Formatter> {
    match mode {
        OutputMode::Delimited => Box::new(delimited::DelimitedFormatter::new(separator)),
        OutputMode::Structured => Box::new(structured::JsonLinesFormatter),
        OutputMode::Sql => Box::new(sql::SqlFormatter::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!("tsv".parse::<OutputMode>(), Ok(OutputMode::Delimited));
        assert_eq!("JSON".parse::<OutputMode>(), Ok(OutputMode::Structured));
        assert_eq!("sql".parse::<OutputMode>(), Ok(OutputMode::Sql));
        assert_eq!(
            "xml".parse::<OutputMode>(),
            Err(UnknownMode("xml".to_string()))
        );
    }

    #[test]
    fn extensions_follow_mode() {
        assert_eq!(create_formatter(OutputMode::Delimited, '\t').file_extension(), "tsv");
        assert_eq!(create_formatter(OutputMode::Structured, '\t').file_extension(), "json");
        assert_eq!(create_formatter(OutputMode::Sql, '\t').file_extension(), "sql");
    }
}
