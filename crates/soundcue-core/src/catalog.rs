//! Read-only queries over a collection of view models.
//!
//! A [`Catalog`] owns the collection it is built from and never changes it.
//! Where the collection came from (seed data, a backend fetch) is decided by
//! the caller before construction.

use std::collections::{BTreeMap, HashSet};

use crate::adapter::Adapter;
use crate::error::Result;
use crate::model::{MusicViewModel, RawAudioRecord};
use crate::taxonomy::{Genre, Taxonomy, VideoContext};

#[derive(Debug, Clone)]
pub struct Catalog<'t> {
    items: Vec<MusicViewModel>,
    taxonomy: &'t Taxonomy,
}

impl<'t> Catalog<'t> {
    #[must_use]
    pub fn new(items: Vec<MusicViewModel>, taxonomy: &'t Taxonomy) -> Self {
        Self { items, taxonomy }
    }

    /// Adapt `raws` and wrap the result, sharing the adapter's taxonomy.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed record.
    pub fn from_records(raws: &[RawAudioRecord], adapter: &Adapter<'t>) -> Result<Self> {
        let items = adapter.adapt_all(raws)?;
        log::debug!("catalog built from {} records", items.len());
        Ok(Self::new(items, adapter.taxonomy()))
    }

    /// Every entry, in insertion order.
    pub fn all_music(&self) -> &[MusicViewModel] {
        &self.items
    }

    pub fn by_genre(&self, genre: Genre) -> Vec<&MusicViewModel> {
        self.items.iter().filter(|m| m.genre == genre).collect()
    }

    /// Entries whose genre suits `context`.
    ///
    /// Genres are looked up in the taxonomy at query time rather than read
    /// from each entry's `suggested_contexts` snapshot. The result is
    /// deduplicated by id.
    pub fn by_context(&self, context: VideoContext) -> Vec<&MusicViewModel> {
        let genres = self.taxonomy.genres_for(context);
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|m| genres.contains(&m.genre))
            .filter(|m| seen.insert(m.id.as_str()))
            .collect()
    }

    /// The entry with exactly this id, if any.
    pub fn by_id(&self, id: &str) -> Option<&MusicViewModel> {
        self.items.iter().find(|m| m.id == id)
    }

    /// Case-insensitive substring match on title or artist.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&MusicViewModel> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&needle)
                    || m.artist.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Entry count per genre. Genres with no entries are included as 0.
    pub fn genre_distribution(&self) -> BTreeMap<Genre, usize> {
        let mut counts: BTreeMap<Genre, usize> = Genre::ALL.iter().map(|&g| (g, 0)).collect();
        for item in &self.items {
            *counts.entry(item.genre).or_default() += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }
}
