//! Core catalog model for soundcue.
//!
//! This crate defines the closed genre and video-context taxonomy, the
//! normalizer that folds free-text backend genre labels into it, the adapter
//! that turns raw backend records into presentation-ready view models, and
//! the query service that answers catalog lookups over a collection of them.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod adapter;
pub mod catalog;
pub mod error;
pub mod model;
pub mod normalize;
pub mod seed;
pub mod taxonomy;

pub use adapter::{Adapter, StreamUrl};
pub use catalog::Catalog;
pub use error::{Error, Result, TaxonomyError};
pub use model::{MusicViewModel, RawAudioRecord, RecordId, UploadAck};
pub use normalize::{classify, normalize, Normalized, Resolution};
pub use taxonomy::{Genre, Taxonomy, VideoContext};
