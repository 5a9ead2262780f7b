//! Title classifier — movie, TV movie, video or TV series.
//!
//! Works on the `name (year)` part of a title span plus the optional type
//! marker that follows it. Quoted names are TV series in the dumps.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static RE_NAME_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\s\((.+)\)$").unwrap());

static RE_QUOTED_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"(.+)"$"#).unwrap());

/// Loose quote test for tokens that could not be split into name and year.
static RE_QUOTED_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^".+""#).unwrap());

/// Substituted for name and year when the token cannot be split.
pub const PARSE_ERROR: &str = "PARSE_ERROR";

pub const MARKER_TV: &str = "(TV)";
pub const MARKER_VIDEO: &str = "(V)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    /// Theatrical release.
    Movie,
    /// Made for TV, single feature.
    TvMovie,
    /// Straight to video.
    Video,
    TvSeries,
}

impl TitleKind {
    /// Decide the kind from quoting and the raw type marker.
    pub fn from_marker(quoted: bool, marker: Option<&str>) -> Self {
        match marker {
            Some(MARKER_TV) => Self::TvMovie,
            Some(MARKER_VIDEO) => Self::Video,
            _ if quoted => Self::TvSeries,
            _ => Self::Movie,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::TvMovie => "TV",
            Self::Video => "V",
            Self::TvSeries => "TV_SERIES",
        }
    }
}

impl fmt::Display for TitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: TitleKind,
    /// Lower-cased name without surrounding quotes.
    pub movie_name: String,
    /// Year text as written in the dump (`1999`, `1999/II`, `????`).
    pub year_released: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("cannot split name and year from {token:?}")]
    MissingYear { token: String },
}

/// Split `Name (year)` into its two parts.
pub fn split_name_year(token: &str) -> Option<(&str, &str)> {
    let caps = RE_NAME_YEAR.captures(token)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

pub fn classify(token: &str, marker: Option<&str>) -> Result<Classification, ClassifyError> {
    let (name, year) = split_name_year(token).ok_or_else(|| ClassifyError::MissingYear {
        token: token.to_string(),
    })?;

    let (clean, quoted) = match RE_QUOTED_NAME.captures(name).and_then(|c| c.get(1)) {
        Some(inner) => (inner.as_str(), true),
        None => (name, false),
    };

    Ok(Classification {
        kind: TitleKind::from_marker(quoted, marker),
        movie_name: clean.to_lowercase(),
        year_released: year.to_string(),
    })
}

/// Like [`classify`], but never fails: the error is logged and
/// [`PARSE_ERROR`] stands in for name and year. The kind is still derived
/// from the raw token.
pub fn classify_or_sentinel(token: &str, marker: Option<&str>) -> Classification {
    classify(token, marker).unwrap_or_else(|err| {
        tracing::warn!(%err, "title classification failed");
        Classification {
            kind: TitleKind::from_marker(RE_QUOTED_PREFIX.is_match(token), marker),
            movie_name: PARSE_ERROR.to_string(),
            year_released: PARSE_ERROR.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tv_marker_wins_over_quoting() {
        let c = classify("\"Foo\" (1999)", Some("(TV)")).unwrap();
        assert_eq!(c.kind, TitleKind::TvMovie);
        assert_eq!(c.kind.as_str(), "TV");
        assert_eq!(c.movie_name, "foo");
    }

    #[test]
    fn video_marker_on_unquoted_name() {
        let c = classify("Bar (2003)", Some("(V)")).unwrap();
        assert_eq!(c.kind, TitleKind::Video);
    }

    #[test]
    fn quoted_without_marker_is_series() {
        let c = classify("\"Foo Series\" (1999)", None).unwrap();
        assert_eq!(c.kind, TitleKind::TvSeries);
        assert_eq!(c.movie_name, "foo series");
        assert_eq!(c.year_released, "1999");
    }

    #[test]
    fn unquoted_without_marker_is_movie() {
        let c = classify("Bar (1999)", None).unwrap();
        assert_eq!(c.kind, TitleKind::Movie);
        assert_eq!(c.movie_name, "bar");
    }

    #[test]
    fn unknown_marker_falls_through_to_quoting() {
        assert_eq!(
            classify("Bar (1999)", Some("(VG)")).unwrap().kind,
            TitleKind::Movie
        );
        assert_eq!(
            classify("\"Bar\" (1999)", Some("(mini)")).unwrap().kind,
            TitleKind::TvSeries
        );
    }

    #[test]
    fn year_text_is_verbatim() {
        assert_eq!(
            classify("Hamlet (1990/I)", None).unwrap().year_released,
            "1990/I"
        );
        assert_eq!(classify("Untitled (????)", None).unwrap().year_released, "????");
    }

    #[test]
    fn last_parenthesised_group_is_the_year() {
        let (name, year) = split_name_year("Movie (The) (2004)").unwrap();
        assert_eq!(name, "Movie (The)");
        assert_eq!(year, "2004");
    }

    #[test]
    fn name_is_lowercased_unicode() {
        let c = classify("Ÿes Ärger (1970)", None).unwrap();
        assert_eq!(c.movie_name, "ÿes ärger");
    }

    #[test]
    fn token_without_name_is_an_error() {
        let err = classify(" (1999)", None).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::MissingYear {
                token: " (1999)".to_string()
            }
        );
    }

    #[test]
    fn sentinel_keeps_the_pipeline_going() {
        let c = classify_or_sentinel("no year here", None);
        assert_eq!(c.movie_name, PARSE_ERROR);
        assert_eq!(c.year_released, PARSE_ERROR);
        assert_eq!(c.kind, TitleKind::Movie);

        let c = classify_or_sentinel("\"Show\"", None);
        assert_eq!(c.kind, TitleKind::TvSeries);
    }
}
