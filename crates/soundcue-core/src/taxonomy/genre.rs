use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaxonomyError;

/// One of the eight canonical music-style categories of the catalog.
///
/// Serialized by its canonical display name (e.g. `"Old-Time Historic"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Classical,
    Electronic,
    Experimental,
    Folk,
    #[serde(rename = "Hip-Hop")]
    HipHop,
    Instrumental,
    #[serde(rename = "Old-Time Historic")]
    OldTimeHistoric,
    Rock,
}

impl Genre {
    /// Every genre, in canonical display order.
    pub const ALL: [Genre; 8] = [
        Genre::Classical,
        Genre::Electronic,
        Genre::Experimental,
        Genre::Folk,
        Genre::HipHop,
        Genre::Instrumental,
        Genre::OldTimeHistoric,
        Genre::Rock,
    ];

    /// The genre unrecognized or missing labels resolve to.
    pub const FALLBACK: Genre = Genre::Instrumental;

    /// Canonical display name, matching the serde representation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classical => "Classical",
            Self::Electronic => "Electronic",
            Self::Experimental => "Experimental",
            Self::Folk => "Folk",
            Self::HipHop => "Hip-Hop",
            Self::Instrumental => "Instrumental",
            Self::OldTimeHistoric => "Old-Time Historic",
            Self::Rock => "Rock",
        }
    }

    /// URL slug used by the browse routes: lowercase, whitespace as `-`.
    #[must_use]
    pub fn slug(self) -> String {
        self.name()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }

    /// Resolve a browse-route slug (case-insensitive) back to its genre.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.slug().eq_ignore_ascii_case(slug))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an exact canonical name. Case matters: `"rock"` is not `Rock`.
impl FromStr for Genre {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| TaxonomyError::UnknownGenre(s.to_string()))
    }
}
