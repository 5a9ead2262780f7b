//! Line matcher: applies one fixed dump-line pattern and exposes its groups.
//!
//! Every dump line starts (or, for credits, continues) with a title span:
//!
//! ```text
//! "Show Name" (2006) (TV) {Episode Name (#1.4)} {{SUSPENDED}}
//! ^name+year^        ^type^ ^---series info----^ ^suspended^
//! ```
//!
//! The regex crate has no lookahead, so the series-info group refuses to
//! start with a second `{`. That keeps a `{{SUSPENDED}}` block out of it.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Title span shared by all three line shapes. Seven groups.
macro_rules! title_span {
    () => {
        concat!(
            r"((.*? \(\S{4,}\)) ?(\(\S+\))? ?",
            r"(\{((?:[^{].*?)??) ?(\(\S+?\))?\})? ?",
            r"(\{\{SUSPENDED\}\})?)"
        )
    };
}

// -- Patterns -----------------------------------------------------------------

/// Title span, tab run, trailing text (year/years active or genre label).
pub static TITLED_LINE: LazyLock<LinePattern> = LazyLock::new(|| {
    LinePattern::new(concat!("^", title_span!(), r"\t+(.*)$")).unwrap()
});

/// Person token, tab run, title span, then independently optional
/// `(info)`, `(info)`, `[role]`, `<billing>` groups.
pub static CREDIT_LINE: LazyLock<LinePattern> = LazyLock::new(|| {
    LinePattern::new(concat!(
        r"^(.*?)\t+",
        title_span!(),
        r"\s*(\(.*?\))?\s*(\(.*\))?\s*(\[.*\])?\s*(<.*>)?$"
    ))
    .unwrap()
});

/// Positions inside [`TITLED_LINE`].
pub mod titled {
    use super::TitleGroups;

    pub const SPAN: TitleGroups = TitleGroups::starting_at(1);
    /// Year text for titles, genre label for genres.
    pub const TRAILER: usize = 8;
}

/// Positions inside [`CREDIT_LINE`].
pub mod credit {
    use super::TitleGroups;

    pub const PERSON: usize = 1;
    pub const SPAN: TitleGroups = TitleGroups::starting_at(2);
    pub const INFO_1: usize = 9;
    pub const INFO_2: usize = 10;
    pub const ROLE: usize = 11;
    pub const BILLING: usize = 12;
}

/// Group positions of the title span, relative to where it starts in a pattern.
#[derive(Debug, Clone, Copy)]
pub struct TitleGroups {
    base: usize,
}

impl TitleGroups {
    pub const fn starting_at(base: usize) -> Self {
        Self { base }
    }

    pub const fn title(self) -> usize {
        self.base
    }

    pub const fn name_year(self) -> usize {
        self.base + 1
    }

    pub const fn marker(self) -> usize {
        self.base + 2
    }

    pub const fn series_info(self) -> usize {
        self.base + 3
    }

    pub const fn episode_name(self) -> usize {
        self.base + 4
    }

    pub const fn episode_number(self) -> usize {
        self.base + 5
    }

    pub const fn suspended(self) -> usize {
        self.base + 6
    }
}

// -- Matcher ------------------------------------------------------------------

/// A compiled, start-anchored line pattern.
#[derive(Debug)]
pub struct LinePattern {
    re: Regex,
}

impl LinePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    pub fn group_count(&self) -> usize {
        self.re.captures_len() - 1
    }

    /// Apply the pattern to one line (terminator already removed).
    pub fn apply<'l>(&self, line: &'l str) -> Result<Matched<'l>, Unmatched<'l>> {
        match self.re.captures(line) {
            Some(caps) => Ok(Matched { caps }),
            None => Err(Unmatched { line }),
        }
    }
}

/// Successful match. Groups are addressed by their position in the pattern.
#[derive(Debug)]
pub struct Matched<'l> {
    caps: Captures<'l>,
}

impl<'l> Matched<'l> {
    /// `None` when the group did not take part in the match, `Some("")` when
    /// it matched empty text.
    pub fn group(&self, index: usize) -> Option<&'l str> {
        self.caps.get(index).map(|m| m.as_str())
    }

    /// Full matched text.
    pub fn text(&self) -> &'l str {
        self.caps.get(0).map_or("", |m| m.as_str())
    }
}

/// Failed match, keeping the offending line for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Unmatched<'l> {
    line: &'l str,
}

impl<'l> Unmatched<'l> {
    pub fn line(&self) -> &'l str {
        self.line
    }

    /// Boilerplate lines between dump sections (empty or a single character).
    pub fn is_blank(&self) -> bool {
        self.line.chars().nth(1).is_none()
    }
}
