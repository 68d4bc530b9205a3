//! Conversion of raw backend records into [`MusicViewModel`]s.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::model::{MusicViewModel, RawAudioRecord, UploadAck, UNKNOWN_ARTIST};
use crate::normalize::normalize;
use crate::taxonomy::Taxonomy;

/// Template turning a record id into a client-usable stream address.
///
/// `{id}` is replaced with the record id. The default routes through the
/// web front-end's stream proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamUrl {
    template: String,
}

impl StreamUrl {
    pub const PLACEHOLDER: &'static str = "{id}";
    pub const DEFAULT_TEMPLATE: &'static str = "/api/stream/{id}";

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the template lacks `{id}`; every
    /// record would otherwise share one URL.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(Self::PLACEHOLDER) {
            return Err(Error::InvalidData(format!(
                "stream url template {template:?} has no {} placeholder",
                Self::PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    #[must_use]
    pub fn render(&self, id: &str) -> String {
        self.template.replace(Self::PLACEHOLDER, id)
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for StreamUrl {
    fn default() -> Self {
        Self {
            template: Self::DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// Builds view models from raw records. Pure: no I/O, no shared state.
#[derive(Debug, Clone)]
pub struct Adapter<'t> {
    taxonomy: &'t Taxonomy,
    stream_url: StreamUrl,
}

impl<'t> Adapter<'t> {
    #[must_use]
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self {
            taxonomy,
            stream_url: StreamUrl::default(),
        }
    }

    #[must_use]
    pub fn with_stream_url(mut self, stream_url: StreamUrl) -> Self {
        self.stream_url = stream_url;
        self
    }

    #[must_use]
    pub const fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    /// Adapt one record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the id or the original filename
    /// is missing or blank.
    pub fn adapt(&self, raw: &RawAudioRecord) -> Result<MusicViewModel> {
        let id = match &raw.id {
            Some(id) if !id.is_blank() => id.to_string(),
            _ => return Err(Error::MalformedRecord { field: "id" }),
        };
        let filename = raw
            .original_filename
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .ok_or(Error::MalformedRecord {
                field: "original_filename",
            })?;

        let title = non_blank(raw.title.as_deref())
            .unwrap_or_else(|| strip_extension(filename))
            .to_string();
        let artist = non_blank(raw.artist.as_deref())
            .unwrap_or(UNKNOWN_ARTIST)
            .to_string();

        let genre = normalize(raw.detected_genre.as_deref());
        let suggested_contexts = self.taxonomy.contexts_for(genre).to_vec();
        let audio_url = self.stream_url.render(&id);

        Ok(MusicViewModel {
            id,
            title,
            artist,
            genre,
            duration: raw.duration.unwrap_or(0),
            audio_url,
            cover_url: raw.cover_url.clone(),
            uploaded_at: raw.uploaded_at,
            suggested_contexts,
        })
    }

    /// Adapt a batch, preserving order. The first malformed record aborts.
    pub fn adapt_all(&self, raws: &[RawAudioRecord]) -> Result<Vec<MusicViewModel>> {
        raws.iter().map(|raw| self.adapt(raw)).collect()
    }

    /// View model for a file the backend just accepted.
    ///
    /// `title` and `artist` are what the uploader typed; blanks fall back to
    /// the filename and the placeholder artist.
    pub fn adapt_upload(
        &self,
        ack: &UploadAck,
        title: Option<&str>,
        artist: Option<&str>,
    ) -> Result<MusicViewModel> {
        let mut raw = RawAudioRecord::new(ack.file_id.clone(), ack.filename.clone())
            .with_uploaded_at(Utc::now());
        raw.detected_genre.clone_from(&ack.detected_genre);
        raw.confidence = ack.confidence;
        raw.title = title.map(String::from);
        raw.artist = artist.map(String::from);
        self.adapt(&raw)
    }
}

/// `value` as given, unless it is missing or only whitespace.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Drop the last `.suffix` of a file name.
///
/// Names without a dot, ending in a dot, or whose last dot sits before a
/// `/` are returned unchanged. A dot-file such as `.hidden` is all suffix
/// and strips to an empty string.
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(i) if i + 1 < filename.len() && !filename[i + 1..].contains('/') => {
            &filename[..i]
        }
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;
    use crate::taxonomy::{Genre, TaxonomyTables, VideoContext};

    fn adapter() -> Adapter<'static> {
        Adapter::new(Taxonomy::builtin())
    }

    #[test]
    fn test_adapt_metal_track() {
        let raw = RawAudioRecord::new(42, "track.final.mp3").with_genre("Metal");
        let music = adapter().adapt(&raw).unwrap();

        assert_eq!(music.id, "42");
        assert_eq!(music.title, "track.final");
        assert_eq!(music.genre, Genre::Rock);
        assert_eq!(
            music.suggested_contexts,
            Taxonomy::builtin().contexts_for(Genre::Rock)
        );
        assert_eq!(music.artist, UNKNOWN_ARTIST);
        assert_eq!(music.duration, 0);
        assert_eq!(music.audio_url, "/api/stream/42");
    }

    #[test]
    fn test_adapt_is_deterministic() {
        let raw = RawAudioRecord::new("abc", "Song.wav")
            .with_genre("Hip Hop")
            .with_duration(200);
        let a = adapter();
        assert_eq!(a.adapt(&raw).unwrap(), a.adapt(&raw).unwrap());
    }

    #[test]
    fn test_adapt_prefers_explicit_title_and_artist() {
        let raw = RawAudioRecord::new(1, "sunset_v2.mp3")
            .with_title("Sunset Dreams")
            .with_artist("Electronic Beats")
            .with_duration(185);
        let music = adapter().adapt(&raw).unwrap();
        assert_eq!(music.title, "Sunset Dreams");
        assert_eq!(music.artist, "Electronic Beats");
        assert_eq!(music.duration, 185);
    }

    #[test]
    fn test_adapt_keeps_explicit_title_and_artist_verbatim() {
        let raw = RawAudioRecord::new(1, "sunset.mp3")
            .with_title("  Sunset Dreams ")
            .with_artist(" Electronic Beats");
        let music = adapter().adapt(&raw).unwrap();
        assert_eq!(music.title, "  Sunset Dreams ");
        assert_eq!(music.artist, " Electronic Beats");
    }

    #[test]
    fn test_adapt_dot_file_title_is_empty() {
        let music = adapter().adapt(&RawAudioRecord::new(1, ".hidden")).unwrap();
        assert_eq!(music.title, "");
    }

    #[test]
    fn test_adapt_blank_title_falls_back_to_filename() {
        let raw = RawAudioRecord::new(1, "intro.flac").with_title("   ");
        assert_eq!(adapter().adapt(&raw).unwrap().title, "intro");
    }

    #[test]
    fn test_adapt_missing_genre_uses_fallback() {
        let raw = RawAudioRecord::new(3, "unknown.ogg");
        let music = adapter().adapt(&raw).unwrap();
        assert_eq!(music.genre, Genre::Instrumental);
        assert!(music.suggested_contexts.contains(&VideoContext::Wedding));
    }

    #[test]
    fn test_adapt_missing_id_is_malformed() {
        let raw = RawAudioRecord {
            original_filename: Some("a.mp3".to_string()),
            ..RawAudioRecord::default()
        };
        let err = adapter().adapt(&raw).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "id" }));
    }

    #[test]
    fn test_adapt_blank_id_is_malformed() {
        let raw = RawAudioRecord::new(" ", "a.mp3");
        assert!(matches!(
            adapter().adapt(&raw),
            Err(Error::MalformedRecord { field: "id" })
        ));
    }

    #[test]
    fn test_adapt_missing_filename_is_malformed() {
        let raw = RawAudioRecord {
            id: Some(RecordId::Number(9)),
            ..RawAudioRecord::default()
        };
        let err = adapter().adapt(&raw).unwrap_err();
        assert_eq!(err.to_string(), "malformed record: missing original_filename");
    }

    #[test]
    fn test_adapt_all_preserves_order() {
        let raws = vec![
            RawAudioRecord::new(3, "c.mp3"),
            RawAudioRecord::new(1, "a.mp3"),
            RawAudioRecord::new(2, "b.mp3"),
        ];
        let ids: Vec<_> = adapter()
            .adapt_all(&raws)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_adapt_all_stops_at_malformed_record() {
        let raws = vec![RawAudioRecord::new(1, "a.mp3"), RawAudioRecord::default()];
        assert!(adapter().adapt_all(&raws).is_err());
    }

    #[test]
    fn test_suggested_contexts_outlive_taxonomy() {
        let custom = Taxonomy::from_tables(TaxonomyTables::builtin()).unwrap();
        let music = Adapter::new(&custom)
            .adapt(&RawAudioRecord::new(1, "a.mp3").with_genre("Rock"))
            .unwrap();
        drop(custom);

        assert_eq!(
            music.suggested_contexts,
            Taxonomy::builtin().contexts_for(Genre::Rock)
        );
    }

    #[test]
    fn test_custom_stream_url() {
        let url = StreamUrl::new("http://localhost:8000/api/v1/stream/{id}").unwrap();
        let music = adapter()
            .with_stream_url(url)
            .adapt(&RawAudioRecord::new(5, "x.mp3"))
            .unwrap();
        assert_eq!(music.audio_url, "http://localhost:8000/api/v1/stream/5");
    }

    #[test]
    fn test_stream_url_requires_placeholder() {
        assert!(StreamUrl::new("/api/stream/").is_err());
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("track.final.mp3"), "track.final");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension(".hidden"), "");
        assert_eq!(strip_extension("a..b"), "a.");
        assert_eq!(strip_extension("trailing."), "trailing.");
        assert_eq!(strip_extension("dir.v2/file"), "dir.v2/file");
    }

    #[test]
    fn test_adapt_upload() {
        let ack = UploadAck {
            message: "ok".to_string(),
            file_id: RecordId::Number(77),
            filename: "beat.mp3".to_string(),
            detected_genre: Some("R&B".to_string()),
            confidence: Some(0.7),
        };
        let music = adapter().adapt_upload(&ack, None, Some("DJ Test")).unwrap();
        assert_eq!(music.id, "77");
        assert_eq!(music.title, "beat");
        assert_eq!(music.artist, "DJ Test");
        assert_eq!(music.genre, Genre::HipHop);
        assert!(music.uploaded_at.is_some());
    }
}
