use thiserror::Error;

use crate::taxonomy::{Genre, VideoContext};

#[derive(Debug, Error)]
pub enum Error {
    /// A backend record lacks a field the adapter cannot do without.
    #[error("malformed record: missing {field}")]
    MalformedRecord { field: &'static str },

    #[error("taxonomy configuration error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Violations of the genre/context table invariants.
///
/// These are configuration errors: they are raised while building a
/// [`Taxonomy`](crate::taxonomy::Taxonomy), never by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("genre {0} has no entry in the genre-to-context table")]
    MissingGenre(Genre),

    #[error("context {0} has no entry in the context-to-genre table")]
    MissingContext(VideoContext),

    #[error("genre {0} maps to no contexts")]
    EmptyGenre(Genre),

    #[error("context {0} maps to no genres")]
    EmptyContext(VideoContext),

    #[error("genre {genre} lists context {context} more than once")]
    DuplicateContext { genre: Genre, context: VideoContext },

    #[error("context {context} lists genre {genre} more than once")]
    DuplicateGenre { context: VideoContext, genre: Genre },

    /// `context` is listed for `genre` but `genre` is not listed for `context`.
    #[error("{genre} -> {context} has no matching {context} -> {genre} entry")]
    MissingInverse { genre: Genre, context: VideoContext },

    /// `genre` is listed for `context` but `context` is not listed for `genre`.
    #[error("{context} -> {genre} has no matching {genre} -> {context} entry")]
    MissingForward { context: VideoContext, genre: Genre },

    #[error("unknown genre name {0:?}")]
    UnknownGenre(String),

    #[error("unknown context name {0:?}")]
    UnknownContext(String),
}

pub type Result<T> = std::result::Result<T, Error>;
