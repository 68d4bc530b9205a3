//! Backend access for soundcue.
//!
//! Provides the HTTP client for the catalog backend, the startup-selected
//! [`MusicSource`] strategy (seed data or backend), and configuration
//! loading.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod source;

pub use client::{BackendClient, HealthResponse, SearchParams, SearchResponse, StatsResponse};
pub use config::{Config, SourceKind};
pub use error::{ApiError, ApiResult};
pub use source::{open_source, MusicSource, RemoteSource, SeedSource};
