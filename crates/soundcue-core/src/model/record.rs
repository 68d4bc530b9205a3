use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of an uploaded audio file.
///
/// The backend uses integers; seed data and other callers may use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Whether the id carries no usable value (a blank string).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One uploaded audio file as the backend describes it.
///
/// Every field is optional at the deserialization level: the adapter, not
/// serde, decides which absences are fatal so it can name the missing field.
/// Fields the backend adds later are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAudioRecord {
    pub id: Option<RecordId>,

    /// Storage-side file name.
    pub filename: Option<String>,

    /// Name of the file as uploaded; the title is derived from it.
    pub original_filename: Option<String>,

    /// Classifier output, in the backend's own vocabulary.
    pub detected_genre: Option<String>,

    /// Classifier confidence, 0.0 to 1.0.
    pub confidence: Option<f64>,

    #[serde(default, with = "timestamp")]
    pub uploaded_at: Option<DateTime<Utc>>,

    pub bucket_name: Option<String>,
    pub object_key: Option<String>,
    pub file_size: Option<u64>,
    pub content_type: Option<String>,
    pub download_url: Option<String>,

    // --- Caller-supplied context (not sent by the backend today) ---
    /// Explicit title; wins over the filename-derived one.
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Duration in seconds.
    pub duration: Option<u32>,
    pub cover_url: Option<String>,
}

impl RawAudioRecord {
    #[must_use]
    pub fn new(id: impl Into<RecordId>, original_filename: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            original_filename: Some(original_filename.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.detected_genre = Some(genre.into());
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_uploaded_at(mut self, uploaded_at: DateTime<Utc>) -> Self {
        self.uploaded_at = Some(uploaded_at);
        self
    }
}

/// The backend's acknowledgement of a completed upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub message: String,
    pub file_id: RecordId,
    pub filename: String,
    #[serde(default)]
    pub detected_genre: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Backend timestamps: RFC 3339, or naive ISO 8601 / bare dates taken as UTC.
/// Anything else reads as no timestamp rather than failing the record.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => {
                let parsed = parse(s);
                if parsed.is_none() {
                    log::warn!("ignoring unparsable timestamp {s:?}");
                }
                Ok(parsed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::from(42).to_string(), "42");
        assert_eq!(RecordId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_record_id_blank() {
        assert!(RecordId::from("  ").is_blank());
        assert!(!RecordId::from(0).is_blank());
    }

    #[test]
    fn test_deserialize_backend_record_ignores_unknown_fields() {
        let json = r#"{
            "id": 7,
            "filename": "a1b2c3.mp3",
            "original_filename": "song.mp3",
            "file_size": 1024,
            "content_type": "audio/mpeg",
            "detected_genre": null,
            "confidence": null,
            "bucket_name": "music-files",
            "object_key": "2024/a1b2c3.mp3",
            "uploaded_at": "2024-03-01T12:30:00.123456",
            "updated_at": "2024-03-01T12:30:00.123456",
            "download_url": "/api/v1/download/7",
            "some_future_field": {"nested": true}
        }"#;
        let record: RawAudioRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, Some(RecordId::Number(7)));
        assert_eq!(record.original_filename.as_deref(), Some("song.mp3"));
        assert!(record.detected_genre.is_none());
        assert_eq!(
            record.uploaded_at.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_deserialize_record_without_genre_field() {
        let record: RawAudioRecord =
            serde_json::from_str(r#"{"id": "x", "original_filename": "y.wav"}"#).unwrap();
        assert_eq!(record.id, Some(RecordId::Text("x".to_string())));
        assert!(record.detected_genre.is_none());
        assert!(record.uploaded_at.is_none());
    }

    #[test]
    fn test_deserialize_record_missing_id_still_parses() {
        let record: RawAudioRecord =
            serde_json::from_str(r#"{"original_filename": "y.wav"}"#).unwrap();
        assert!(record.id.is_none());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(timestamp::parse("2024-01-15"), Some(expected));
        assert_eq!(timestamp::parse("2024-01-15T00:00:00"), Some(expected));
        assert_eq!(timestamp::parse("2024-01-15T02:00:00+02:00"), Some(expected));
        assert_eq!(timestamp::parse("yesterday"), None);
    }

    #[test]
    fn test_invalid_timestamp_reads_as_absent() {
        let record: RawAudioRecord =
            serde_json::from_str(r#"{"id": 1, "original_filename": "a", "uploaded_at": "soon"}"#)
                .unwrap();
        assert_eq!(record.id, Some(RecordId::Number(1)));
        assert!(record.uploaded_at.is_none());
    }

    #[test]
    fn test_one_bad_timestamp_keeps_the_rest_of_the_page() {
        let json = r#"[
            {"id": 1, "original_filename": "a.mp3", "uploaded_at": "not-a-date"},
            {"id": 2, "original_filename": "b.mp3", "uploaded_at": "2024-01-15"}
        ]"#;
        let records: Vec<RawAudioRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].uploaded_at.is_none());
        assert!(records[1].uploaded_at.is_some());
    }

    #[test]
    fn test_upload_ack_deserialize() {
        let json = r#"{
            "message": "File uploaded successfully",
            "file_id": 12,
            "filename": "beat.mp3",
            "detected_genre": "Hip Hop",
            "confidence": 0.87
        }"#;
        let ack: UploadAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.file_id, RecordId::Number(12));
        assert_eq!(ack.detected_genre.as_deref(), Some("Hip Hop"));
    }
}
