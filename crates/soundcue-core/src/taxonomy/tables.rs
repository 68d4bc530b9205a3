//! Bidirectional genre ↔ video-context tables.
//!
//! Both directions are written out as data rather than derived from one
//! another, so the two can drift. [`TaxonomyTables::problems`] audits a pair
//! of tables for totality, emptiness, duplicates and asymmetry, and
//! [`Taxonomy`] only ever wraps tables that pass that audit.
//!
//! Overrides can be loaded from a TOML file:
//!
//! ```toml
//! [genre_contexts]
//! "Classical" = ["cinematic", "drama"]
//!
//! [context_genres]
//! cinematic = ["Classical"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result, TaxonomyError};
use crate::taxonomy::{Genre, VideoContext};

// ---------------------------------------------------------------------------
// Shipped tables
// ---------------------------------------------------------------------------

/// Genre to contexts, in display priority order.
const GENRE_CONTEXTS: &[(Genre, &[VideoContext])] = {
    use VideoContext::{
        Action, Cinematic, Corporate, Documentary, Drama, Funny, Gaming, Horror, Romantic, Sports,
        Travel, Vlog, Wedding,
    };
    &[
        (
            Genre::Classical,
            &[Cinematic, Drama, Romantic, Wedding, Corporate, Documentary],
        ),
        (
            Genre::Electronic,
            &[Funny, Cinematic, Gaming, Action, Sports, Corporate, Horror, Travel],
        ),
        (Genre::Experimental, &[Cinematic, Gaming, Horror, Action]),
        (Genre::Folk, &[Vlog, Drama, Travel, Documentary, Romantic]),
        (Genre::HipHop, &[Funny, Vlog, Gaming, Action, Sports]),
        (
            Genre::Instrumental,
            &[Vlog, Cinematic, Gaming, Corporate, Documentary, Wedding, Romantic, Travel],
        ),
        (
            Genre::OldTimeHistoric,
            &[Drama, Cinematic, Documentary, Wedding, Romantic],
        ),
        (Genre::Rock, &[Funny, Cinematic, Gaming, Action, Sports]),
    ]
};

/// Context to genres.
const CONTEXT_GENRES: &[(VideoContext, &[Genre])] = {
    use Genre::{
        Classical, Electronic, Experimental, Folk, HipHop, Instrumental, OldTimeHistoric, Rock,
    };
    &[
        (VideoContext::Funny, &[Electronic, HipHop, Rock]),
        (VideoContext::Vlog, &[Folk, HipHop, Instrumental]),
        (VideoContext::Drama, &[Classical, Folk, OldTimeHistoric]),
        (
            VideoContext::Cinematic,
            &[Classical, Electronic, Experimental, Instrumental, OldTimeHistoric, Rock],
        ),
        (
            VideoContext::Gaming,
            &[Electronic, Experimental, HipHop, Instrumental, Rock],
        ),
        (VideoContext::Action, &[Electronic, Experimental, HipHop, Rock]),
        (
            VideoContext::Romantic,
            &[Classical, Folk, Instrumental, OldTimeHistoric],
        ),
        (VideoContext::Horror, &[Experimental, Electronic]),
        (
            VideoContext::Documentary,
            &[Classical, Folk, Instrumental, OldTimeHistoric],
        ),
        (VideoContext::Travel, &[Folk, Instrumental, Electronic]),
        (VideoContext::Corporate, &[Classical, Electronic, Instrumental]),
        (VideoContext::Sports, &[Electronic, HipHop, Rock]),
        (VideoContext::Wedding, &[Classical, Instrumental, OldTimeHistoric]),
    ]
};

// ---------------------------------------------------------------------------
// Unvalidated tables
// ---------------------------------------------------------------------------

/// A pair of genre/context tables that has not been audited yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyTables {
    pub genre_contexts: BTreeMap<Genre, Vec<VideoContext>>,
    pub context_genres: BTreeMap<VideoContext, Vec<Genre>>,
}

/// On-disk shape: names as strings so unknown names get a precise error.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    genre_contexts: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    context_genres: BTreeMap<String, Vec<String>>,
}

impl TaxonomyTables {
    /// The tables shipped with soundcue.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            genre_contexts: GENRE_CONTEXTS
                .iter()
                .map(|&(g, cs)| (g, cs.to_vec()))
                .collect(),
            context_genres: CONTEXT_GENRES
                .iter()
                .map(|&(c, gs)| (c, gs.to_vec()))
                .collect(),
        }
    }

    /// Load tables from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// names a genre or context outside the closed sets.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let file: TaxonomyFile = toml::from_str(&content).map_err(|e| {
            Error::InvalidData(format!(
                "failed to parse taxonomy tables from {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_file(file)
    }

    /// Parse tables from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content)
            .map_err(|e| Error::InvalidData(format!("failed to parse taxonomy tables: {e}")))?;
        Self::from_file(file)
    }

    /// Render the tables in the TOML format [`TaxonomyTables::load`] reads.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = TaxonomyFile {
            genre_contexts: self
                .genre_contexts
                .iter()
                .map(|(g, cs)| {
                    (
                        g.name().to_string(),
                        cs.iter().map(|c| c.slug().to_string()).collect(),
                    )
                })
                .collect(),
            context_genres: self
                .context_genres
                .iter()
                .map(|(c, gs)| {
                    (
                        c.slug().to_string(),
                        gs.iter().map(|g| g.name().to_string()).collect(),
                    )
                })
                .collect(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| Error::InvalidData(format!("failed to render taxonomy tables: {e}")))
    }

    fn from_file(file: TaxonomyFile) -> Result<Self> {
        let mut tables = Self::default();

        for (genre, contexts) in file.genre_contexts {
            let genre: Genre = genre.parse()?;
            let contexts = contexts
                .iter()
                .map(|c| c.parse::<VideoContext>())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            tables.genre_contexts.insert(genre, contexts);
        }

        for (context, genres) in file.context_genres {
            let context: VideoContext = context.parse()?;
            let genres = genres
                .iter()
                .map(|g| g.parse::<Genre>())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            tables.context_genres.insert(context, genres);
        }

        Ok(tables)
    }

    /// Every invariant violation in these tables, in a stable order:
    /// totality and emptiness first, then duplicates, then asymmetry.
    #[must_use]
    pub fn problems(&self) -> Vec<TaxonomyError> {
        let mut problems = Vec::new();

        for genre in Genre::ALL {
            match self.genre_contexts.get(&genre) {
                None => problems.push(TaxonomyError::MissingGenre(genre)),
                Some(contexts) if contexts.is_empty() => {
                    problems.push(TaxonomyError::EmptyGenre(genre));
                }
                Some(_) => {}
            }
        }
        for context in VideoContext::ALL {
            match self.context_genres.get(&context) {
                None => problems.push(TaxonomyError::MissingContext(context)),
                Some(genres) if genres.is_empty() => {
                    problems.push(TaxonomyError::EmptyContext(context));
                }
                Some(_) => {}
            }
        }

        for (&genre, contexts) in &self.genre_contexts {
            for context in duplicates(contexts) {
                problems.push(TaxonomyError::DuplicateContext { genre, context });
            }
        }
        for (&context, genres) in &self.context_genres {
            for genre in duplicates(genres) {
                problems.push(TaxonomyError::DuplicateGenre { context, genre });
            }
        }

        for (&genre, contexts) in &self.genre_contexts {
            for &context in contexts {
                let listed = self
                    .context_genres
                    .get(&context)
                    .is_some_and(|gs| gs.contains(&genre));
                if !listed {
                    problems.push(TaxonomyError::MissingInverse { genre, context });
                }
            }
        }
        for (&context, genres) in &self.context_genres {
            for &genre in genres {
                let listed = self
                    .genre_contexts
                    .get(&genre)
                    .is_some_and(|cs| cs.contains(&context));
                if !listed {
                    problems.push(TaxonomyError::MissingForward { context, genre });
                }
            }
        }

        problems
    }
}

/// Values that occur more than once, each reported once, in first-seen order.
fn duplicates<T: Copy + PartialEq>(values: &[T]) -> Vec<T> {
    let mut dups: Vec<T> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        if values[..i].contains(v) && !dups.contains(v) {
            dups.push(*v);
        }
    }
    dups
}

// ---------------------------------------------------------------------------
// Validated taxonomy
// ---------------------------------------------------------------------------

/// Audited genre ↔ context tables.
///
/// Every genre maps to at least one context and vice versa, no entry repeats,
/// and each direction is the transpose of the other. Lookups are therefore
/// total and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    tables: TaxonomyTables,
}

impl Taxonomy {
    /// The shipped tables, audited on first access and shared for the rest
    /// of the process.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in tables violate an invariant. That is a
    /// programming error, not a runtime condition.
    pub fn builtin() -> &'static Taxonomy {
        static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
        BUILTIN.get_or_init(|| match Self::from_tables(TaxonomyTables::builtin()) {
            Ok(taxonomy) => taxonomy,
            Err(e) => panic!("built-in taxonomy tables are inconsistent: {e}"),
        })
    }

    /// Audit `tables` and wrap them.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`TaxonomyTables::problems`] reports.
    pub fn from_tables(tables: TaxonomyTables) -> Result<Self> {
        if let Some(problem) = tables.problems().into_iter().next() {
            return Err(Error::Taxonomy(problem));
        }
        Ok(Self { tables })
    }

    /// Load and audit tables from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let taxonomy = Self::from_tables(TaxonomyTables::load(path)?)?;
        log::debug!("loaded taxonomy tables from {}", path.display());
        Ok(taxonomy)
    }

    /// Contexts suggested for `genre`, in display priority order.
    pub fn contexts_for(&self, genre: Genre) -> &[VideoContext] {
        self.tables
            .genre_contexts
            .get(&genre)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Genres that suit `context`.
    pub fn genres_for(&self, context: VideoContext) -> &[Genre] {
        self.tables
            .context_genres
            .get(&context)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub const fn tables(&self) -> &TaxonomyTables {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tables_have_no_problems() {
        let problems = TaxonomyTables::builtin().problems();
        assert!(problems.is_empty(), "inconsistent tables: {problems:?}");
    }

    #[test]
    fn test_every_genre_has_contexts() {
        let taxonomy = Taxonomy::builtin();
        for genre in Genre::ALL {
            assert!(!taxonomy.contexts_for(genre).is_empty(), "{genre}");
        }
    }

    #[test]
    fn test_every_context_has_genres() {
        let taxonomy = Taxonomy::builtin();
        for context in VideoContext::ALL {
            assert!(!taxonomy.genres_for(context).is_empty(), "{context}");
        }
    }

    #[test]
    fn test_forward_and_inverse_agree() {
        let taxonomy = Taxonomy::builtin();
        for genre in Genre::ALL {
            for &context in taxonomy.contexts_for(genre) {
                assert!(
                    taxonomy.genres_for(context).contains(&genre),
                    "{genre} -> {context} has no inverse"
                );
            }
        }
        for context in VideoContext::ALL {
            for &genre in taxonomy.genres_for(context) {
                assert!(
                    taxonomy.contexts_for(genre).contains(&context),
                    "{context} -> {genre} has no forward entry"
                );
            }
        }
    }

    #[test]
    fn test_wedding_genres() {
        assert_eq!(
            Taxonomy::builtin().genres_for(VideoContext::Wedding),
            &[Genre::Classical, Genre::Instrumental, Genre::OldTimeHistoric]
        );
    }

    #[test]
    fn test_contexts_keep_priority_order() {
        let contexts = Taxonomy::builtin().contexts_for(Genre::Classical);
        assert_eq!(contexts[0], VideoContext::Cinematic);
        assert_eq!(contexts[1], VideoContext::Drama);
    }

    #[test]
    fn test_missing_genre_is_reported() {
        let mut tables = TaxonomyTables::builtin();
        tables.genre_contexts.remove(&Genre::Rock);
        let problems = tables.problems();
        assert_eq!(problems[0], TaxonomyError::MissingGenre(Genre::Rock));
        // Rock is still listed on the inverse side, so asymmetry shows up too.
        assert!(problems.contains(&TaxonomyError::MissingForward {
            context: VideoContext::Funny,
            genre: Genre::Rock,
        }));
    }

    #[test]
    fn test_empty_context_is_reported() {
        let mut tables = TaxonomyTables::builtin();
        tables.context_genres.insert(VideoContext::Horror, Vec::new());
        assert!(tables
            .problems()
            .contains(&TaxonomyError::EmptyContext(VideoContext::Horror)));
    }

    #[test]
    fn test_duplicate_context_is_reported_once() {
        let mut tables = TaxonomyTables::builtin();
        tables.genre_contexts.insert(
            Genre::Folk,
            vec![
                VideoContext::Vlog,
                VideoContext::Vlog,
                VideoContext::Vlog,
                VideoContext::Drama,
                VideoContext::Travel,
                VideoContext::Documentary,
                VideoContext::Romantic,
            ],
        );
        let dups: Vec<_> = tables
            .problems()
            .into_iter()
            .filter(|p| matches!(p, TaxonomyError::DuplicateContext { .. }))
            .collect();
        assert_eq!(
            dups,
            vec![TaxonomyError::DuplicateContext {
                genre: Genre::Folk,
                context: VideoContext::Vlog,
            }]
        );
    }

    #[test]
    fn test_original_asymmetry_is_detected() {
        // The inverse table lists Electronic for horror; drop the forward entry.
        let mut tables = TaxonomyTables::builtin();
        tables
            .genre_contexts
            .get_mut(&Genre::Electronic)
            .unwrap()
            .retain(|&c| c != VideoContext::Horror);

        let err = Taxonomy::from_tables(tables).unwrap_err();
        assert!(matches!(
            err,
            Error::Taxonomy(TaxonomyError::MissingForward {
                context: VideoContext::Horror,
                genre: Genre::Electronic,
            })
        ));
    }

    #[test]
    fn test_toml_round_trip_preserves_tables() {
        let tables = TaxonomyTables::builtin();
        let text = tables.to_toml_string().unwrap();
        let parsed = TaxonomyTables::from_toml_str(&text).unwrap();
        assert_eq!(parsed, tables);
    }

    #[test]
    fn test_toml_unknown_genre_is_rejected() {
        let text = r#"
[genre_contexts]
"Jazz" = ["cinematic"]
"#;
        let err = TaxonomyTables::from_toml_str(text).unwrap_err();
        assert!(matches!(
            err,
            Error::Taxonomy(TaxonomyError::UnknownGenre(ref name)) if name == "Jazz"
        ));
    }

    #[test]
    fn test_load_partial_file_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[genre_contexts]\n\"Rock\" = [\"sports\"]").unwrap();

        let err = Taxonomy::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Taxonomy(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Taxonomy::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
