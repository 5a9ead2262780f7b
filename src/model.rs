//! Format-agnostic records extracted from dump lines.
//!
//! Records borrow from the line they were cut from and are dropped right
//! after rendering. Renderers address fields by name through
//! [`Record::fields`].

use crate::classify::{Classification, TitleKind};
use crate::matcher::{Matched, TitleGroups};

/// Ordered `(name, value)` view of a record. `None` is "no value".
pub type Fields<'a> = Vec<(&'static str, Option<&'a str>)>;

/// The title span every line shape carries.
#[derive(Debug, Clone)]
pub struct TitleSpan<'l> {
    /// Join key shared by all datasets.
    pub title: &'l str,
    pub name_year: &'l str,
    pub marker: Option<&'l str>,
    pub series_info: Option<&'l str>,
    pub episode_name: Option<&'l str>,
    pub episode_number: Option<&'l str>,
    pub suspended: bool,
}

impl<'l> TitleSpan<'l> {
    pub fn from_match(m: &Matched<'l>, groups: TitleGroups) -> Self {
        Self {
            title: m.group(groups.title()).unwrap_or_default(),
            name_year: m.group(groups.name_year()).unwrap_or_default(),
            marker: m.group(groups.marker()),
            series_info: m.group(groups.series_info()),
            episode_name: m.group(groups.episode_name()),
            episode_number: m.group(groups.episode_number()),
            suspended: m.group(groups.suspended()).is_some(),
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// One line of movies.list.
#[derive(Debug, Clone)]
pub struct TitleRecord<'l> {
    pub span: TitleSpan<'l>,
    pub class: Classification,
    /// Trailing years text as it appears in the dump.
    pub years: Option<&'l str>,
    /// Same text, kept for TV series only.
    pub years_active: Option<&'l str>,
}

impl<'l> TitleRecord<'l> {
    pub fn new(span: TitleSpan<'l>, class: Classification, trailer: Option<&'l str>) -> Self {
        let years_active = match class.kind {
            TitleKind::TvSeries => trailer,
            _ => None,
        };
        Self {
            span,
            class,
            years: trailer,
            years_active,
        }
    }

    pub fn fields(&self) -> Fields<'_> {
        vec![
            ("title", Some(self.span.title)),
            ("full_name", Some(self.class.movie_name.as_str())),
            ("type", Some(self.class.kind.as_str())),
            ("series_info", self.span.series_info),
            ("episode_name", self.span.episode_name),
            ("episode_number", self.span.episode_number),
            ("suspended", Some(flag(self.span.suspended))),
            ("year_released", Some(self.class.year_released.as_str())),
            ("years", self.years),
            ("years_active", self.years_active),
        ]
    }
}

/// One line of genres.list.
#[derive(Debug, Clone)]
pub struct GenreAssociation<'l> {
    pub span: TitleSpan<'l>,
    pub class: Classification,
    pub genre: &'l str,
}

impl GenreAssociation<'_> {
    pub fn fields(&self) -> Fields<'_> {
        vec![
            ("title", Some(self.span.title)),
            ("genre", Some(self.genre)),
            ("movie_name", Some(self.class.movie_name.as_str())),
            ("type", Some(self.class.kind.as_str())),
            ("year_released", Some(self.class.year_released.as_str())),
        ]
    }
}

/// Person name carried across the lines of one filmography.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub name: String,
    pub surname: String,
}

impl PersonName {
    /// `"Surname, Name"` → both parts; anything else is a bare name.
    pub fn split(token: &str) -> Self {
        let parts: Vec<&str> = token.split(", ").collect();
        match parts.as_slice() {
            [surname, name] => Self {
                name: name.to_string(),
                surname: surname.to_string(),
            },
            _ => Self {
                name: token.to_string(),
                surname: String::new(),
            },
        }
    }

    /// Name for a credit line: the line's own token, or `previous` when the
    /// token is empty (continuation of a filmography).
    pub fn resolve(token: Option<&str>, previous: &PersonName) -> Self {
        match token {
            Some(t) if !t.trim().is_empty() => Self::split(t),
            _ => previous.clone(),
        }
    }
}

/// One line of actors.list / actresses.list.
#[derive(Debug, Clone)]
pub struct PersonCredit<'l> {
    pub person: PersonName,
    pub span: TitleSpan<'l>,
    pub class: Classification,
    pub info_1: Option<&'l str>,
    pub info_2: Option<&'l str>,
    pub role: Option<&'l str>,
    /// Digits inside the trailing `<...>` group.
    pub billing: Option<&'l str>,
}

impl PersonCredit<'_> {
    pub fn fields(&self) -> Fields<'_> {
        vec![
            ("name", Some(self.person.name.as_str())),
            ("surname", Some(self.person.surname.as_str())),
            ("title", Some(self.span.title)),
            ("movie_name", Some(self.class.movie_name.as_str())),
            ("type", Some(self.class.kind.as_str())),
            ("year_released", Some(self.class.year_released.as_str())),
            ("info_1", self.info_1),
            ("info_2", self.info_2),
            ("role", self.role),
            ("billing", self.billing),
        ]
    }
}

#[derive(Debug, Clone)]
pub enum Record<'l> {
    Title(TitleRecord<'l>),
    Genre(GenreAssociation<'l>),
    Credit(PersonCredit<'l>),
}

impl Record<'_> {
    pub fn fields(&self) -> Fields<'_> {
        match self {
            Record::Title(r) => r.fields(),
            Record::Genre(r) => r.fields(),
            Record::Credit(r) => r.fields(),
        }
    }
}

/// Value of a named field. Unknown names read as "no value".
pub fn lookup<'a>(fields: &Fields<'a>, name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| *value)
}
