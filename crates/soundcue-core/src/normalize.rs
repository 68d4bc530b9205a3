//! Folding of free-text genre labels into the canonical taxonomy.
//!
//! The backend's classifier (and older uploads) emit labels from a wider
//! vocabulary than the eight catalog genres. [`normalize`] maps any label,
//! including a missing one, onto exactly one [`Genre`]:
//!
//! 1. missing or empty → [`Genre::FALLBACK`]
//! 2. exact canonical name (case-sensitive) → that genre
//! 3. known spelling variant → its canonical genre
//! 4. known non-catalog genre → the nearest catalog genre (editorial table)
//! 5. anything else → [`Genre::FALLBACK`]

use serde::Serialize;

use crate::taxonomy::Genre;

/// Alternate spellings of catalog genres seen in backend output.
const SYNONYMS: &[(&str, Genre)] = &[
    ("Hip Hop", Genre::HipHop),
    ("Old-Time", Genre::OldTimeHistoric),
];

/// Genres outside the catalog and the catalog genre they are filed under.
const EDITORIAL: &[(&str, Genre)] = &[
    ("Jazz", Genre::Classical),
    ("Blues", Genre::Folk),
    ("Country", Genre::Folk),
    ("Pop", Genre::Rock),
    ("R&B", Genre::HipHop),
    ("Metal", Genre::Rock),
];

/// Which rule resolved a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Canonical,
    Synonym,
    Editorial,
    Fallback,
}

/// A normalized genre together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Normalized {
    pub genre: Genre,
    pub resolution: Resolution,
}

impl Normalized {
    const fn new(genre: Genre, resolution: Resolution) -> Self {
        Self { genre, resolution }
    }
}

fn lookup(table: &[(&str, Genre)], label: &str) -> Option<Genre> {
    for &(name, genre) in table {
        if name == label {
            return Some(genre);
        }
    }
    None
}

/// Resolve a label and report which rule applied.
pub fn classify(label: Option<&str>) -> Normalized {
    let label = match label {
        None | Some("") => return Normalized::new(Genre::FALLBACK, Resolution::Fallback),
        Some(label) => label,
    };

    if let Ok(genre) = label.parse::<Genre>() {
        return Normalized::new(genre, Resolution::Canonical);
    }
    if let Some(genre) = lookup(SYNONYMS, label) {
        return Normalized::new(genre, Resolution::Synonym);
    }
    if let Some(genre) = lookup(EDITORIAL, label) {
        return Normalized::new(genre, Resolution::Editorial);
    }

    log::debug!("unrecognized genre label {label:?}, using {}", Genre::FALLBACK);
    Normalized::new(Genre::FALLBACK, Resolution::Fallback)
}

/// Resolve a label to its catalog genre. Never fails.
pub fn normalize(label: Option<&str>) -> Genre {
    classify(label).genre
}
