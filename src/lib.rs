//! # imdb-lists
//!
//! Converts the IMDb plain-text list dumps (`movies.list`, `genres.list`,
//! `actors.list`, `actresses.list`) into TSV, JSON lines, or SQL scripts.
//!
//! Each dump line is matched against a fixed pattern, cut into a record,
//! enriched with the title classification and rendered by the formatter
//! picked for the run. Lines that do not match are counted and logged.
//!
//! ```
//! use imdb_lists::category::Category;
//! use imdb_lists::extract::{extract, ExtractOptions};
//! use imdb_lists::render::{create_formatter, OutputMode};
//!
//! let spec = Category::Genres.spec();
//! let mut opts = ExtractOptions::for_spec(spec);
//! opts.header_lines = 0;
//!
//! let mut formatter = create_formatter(OutputMode::Delimited, '\t');
//! let mut out = Vec::new();
//! let summary = extract(spec, &opts, "Bar (1999)\tDrama\n".as_bytes(), formatter.as_mut(), &mut out)
//!     .unwrap();
//!
//! assert_eq!(summary.records, 1);
//! assert_eq!(out, b"Bar (1999)\tDrama\n");
//! ```

pub mod category;
pub mod classify;
pub mod driver;
pub mod extract;
pub mod input;
pub mod matcher;
pub mod model;
pub mod render;

pub use category::{Category, CategorySpec, RecordKind};
pub use classify::{classify, Classification, TitleKind};
pub use driver::{run_batch, run_category, BatchReport, Settings};
pub use extract::{extract, parse_line, ExtractError, ExtractOptions, LineOutcome, Summary};
pub use input::Encoding;
pub use render::{create_formatter, Formatter, OutputMode};
