use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::record::timestamp;
use crate::taxonomy::{Genre, VideoContext};

/// Placeholder shown when a record carries no artist.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A presentation-ready catalog entry.
///
/// Produced only by the [`Adapter`](crate::adapter::Adapter) and never
/// mutated afterwards. `suggested_contexts` is a snapshot taken at
/// adaptation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicViewModel {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: Genre,

    /// Duration in seconds; 0 means unknown.
    pub duration: u32,

    pub audio_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    #[serde(default, with = "timestamp")]
    pub uploaded_at: Option<DateTime<Utc>>,

    pub suggested_contexts: Vec<VideoContext>,
}

impl MusicViewModel {
    /// `m:ss`, or `--:--` when the duration is unknown.
    #[must_use]
    pub fn duration_display(&self) -> String {
        if self.duration == 0 {
            return String::from("--:--");
        }
        format!("{}:{:02}", self.duration / 60, self.duration % 60)
    }

    #[must_use]
    pub fn has_known_artist(&self) -> bool {
        self.artist != UNKNOWN_ARTIST
    }
}
