//! Per-category configuration: input file, header size, end-of-dump marker,
//! record shape and the column/key tables each output format reads.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::matcher::{LinePattern, CREDIT_LINE, TITLED_LINE};

/// Which extractor a category runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Title,
    Genre,
    Credit,
}

impl RecordKind {
    pub fn pattern(self) -> &'static LinePattern {
        match self {
            RecordKind::Title | RecordKind::Genre => &*TITLED_LINE,
            RecordKind::Credit => &*CREDIT_LINE,
        }
    }

    /// Whether near-empty lines are expected boilerplate rather than errors.
    pub fn skips_blank_lines(self) -> bool {
        !matches!(self, RecordKind::Genre)
    }
}

/// How a value is typed in JSON and SQL output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    /// Record field the column is filled from.
    pub field: &'static str,
    pub kind: ValueKind,
    /// SQL type and column constraints.
    pub sql: &'static str,
}

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub constraints: Option<&'static str>,
}

#[derive(Debug)]
pub struct Key {
    pub name: &'static str,
    pub field: &'static str,
    pub kind: ValueKind,
    /// Drop the key instead of writing `null`.
    pub skip_if_absent: bool,
}

#[derive(Debug)]
pub struct CategorySpec {
    pub name: &'static str,
    pub input_file: &'static str,
    pub header_lines: usize,
    pub end_of_dump: Option<&'static str>,
    pub kind: RecordKind,
    /// `doc_type` discriminator in JSON output.
    pub doc_type: &'static str,
    /// Fields written in delimited output, in order.
    pub delimited: &'static [&'static str],
    pub keys: &'static [Key],
    pub table: Table,
}

const MOVIES_END: &str =
    "--------------------------------------------------------------------------------";
const CREDITS_END: &str =
    "-----------------------------------------------------------------------------";

const fn text(name: &'static str, sql: &'static str) -> Column {
    Column {
        name,
        field: name,
        kind: ValueKind::Text,
        sql,
    }
}

const fn key(name: &'static str, field: &'static str, kind: ValueKind) -> Key {
    Key {
        name,
        field,
        kind,
        skip_if_absent: false,
    }
}

// -- movies -------------------------------------------------------------------

static MOVIES: CategorySpec = CategorySpec {
    name: "movies",
    input_file: "movies.list",
    header_lines: 15,
    end_of_dump: Some(MOVIES_END),
    kind: RecordKind::Title,
    doc_type: "movie",
    delimited: &[
        "title",
        "full_name",
        "type",
        "episode_name",
        "episode_number",
        "suspended",
        "year_released",
        "years",
    ],
    keys: &[
        key("title", "title", ValueKind::Text),
        key("full_name", "full_name", ValueKind::Text),
        key("type", "type", ValueKind::Text),
        key("series_info", "series_info", ValueKind::Text),
        key("ep_name", "episode_name", ValueKind::Text),
        key("ep_num", "episode_number", ValueKind::Text),
        key("suspended", "suspended", ValueKind::Integer),
        key("year_released", "year_released", ValueKind::Text),
        Key {
            name: "tv_series_years_active",
            field: "years_active",
            kind: ValueKind::Text,
            skip_if_absent: true,
        },
    ],
    table: Table {
        name: "movies",
        columns: &[
            text("title", "VARCHAR(255) NOT NULL"),
            text("full_name", "VARCHAR(127)"),
            text("type", "VARCHAR(20)"),
            Column {
                name: "ep_name",
                field: "episode_name",
                kind: ValueKind::Text,
                sql: "VARCHAR(127)",
            },
            Column {
                name: "ep_num",
                field: "episode_number",
                kind: ValueKind::Text,
                sql: "VARCHAR(20)",
            },
            Column {
                name: "suspended",
                field: "suspended",
                kind: ValueKind::Integer,
                sql: "INT",
            },
            Column {
                name: "year",
                field: "year_released",
                kind: ValueKind::Text,
                sql: "VARCHAR(20)",
            },
            text("years", "VARCHAR(20)"),
        ],
        constraints: Some("PRIMARY KEY(title)"),
    },
};

// -- genres -------------------------------------------------------------------

static GENRES: CategorySpec = CategorySpec {
    name: "genres",
    input_file: "genres.list",
    header_lines: 378,
    end_of_dump: None,
    kind: RecordKind::Genre,
    doc_type: "genre",
    delimited: &["title", "genre"],
    keys: &[
        key("title", "title", ValueKind::Text),
        key("genre", "genre", ValueKind::Text),
        key("movie_name", "movie_name", ValueKind::Text),
        key("movie_type", "type", ValueKind::Text),
        key("year_released", "year_released", ValueKind::Text),
    ],
    table: Table {
        name: "genres",
        columns: &[
            text("title", "VARCHAR(255) NOT NULL"),
            text("genre", "VARCHAR(127)"),
        ],
        constraints: None,
    },
};

// -- actors / actresses -------------------------------------------------------

const CREDIT_FIELDS: &[&str] = &["name", "surname", "title", "info_1", "info_2", "role"];

const CREDIT_KEYS: &[Key] = &[
    key("name", "name", ValueKind::Text),
    key("surname", "surname", ValueKind::Text),
    key("title", "title", ValueKind::Text),
    key("movie_name", "movie_name", ValueKind::Text),
    key("movie_type", "type", ValueKind::Text),
    key("year_released", "year_released", ValueKind::Text),
    key("info_1", "info_1", ValueKind::Text),
    key("info_2", "info_2", ValueKind::Text),
    key("role", "role", ValueKind::Text),
    key("billing", "billing", ValueKind::Integer),
];

const CREDIT_COLUMNS: &[Column] = &[
    text("name", "VARCHAR(127)"),
    text("surname", "VARCHAR(127)"),
    text("title", "VARCHAR(255) NOT NULL"),
    text("info_1", "VARCHAR(127)"),
    text("info_2", "VARCHAR(127)"),
    text("role", "VARCHAR(127)"),
    Column {
        name: "billing",
        field: "billing",
        kind: ValueKind::Integer,
        sql: "INT",
    },
];

static ACTORS: CategorySpec = CategorySpec {
    name: "actors",
    input_file: "actors.list",
    header_lines: 239,
    end_of_dump: Some(CREDITS_END),
    kind: RecordKind::Credit,
    doc_type: "actor",
    delimited: CREDIT_FIELDS,
    keys: CREDIT_KEYS,
    table: Table {
        name: "actors",
        columns: CREDIT_COLUMNS,
        constraints: None,
    },
};

static ACTRESSES: CategorySpec = CategorySpec {
    name: "actresses",
    input_file: "actresses.list",
    header_lines: 241,
    end_of_dump: Some(CREDITS_END),
    kind: RecordKind::Credit,
    doc_type: "actress",
    delimited: CREDIT_FIELDS,
    keys: CREDIT_KEYS,
    table: Table {
        name: "actresses",
        columns: CREDIT_COLUMNS,
        constraints: None,
    },
};

// -- Category -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Movies,
    Genres,
    Actors,
    Actresses,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: {0}. Use movies, genres, actors, or actresses")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Default batch order.
    pub const ALL: [Category; 4] = [
        Category::Movies,
        Category::Genres,
        Category::Actors,
        Category::Actresses,
    ];

    pub fn spec(self) -> &'static CategorySpec {
        match self {
            Category::Movies => &MOVIES,
            Category::Genres => &GENRES,
            Category::Actors => &ACTORS,
            Category::Actresses => &ACTRESSES,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
