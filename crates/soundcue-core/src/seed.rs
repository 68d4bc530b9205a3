//! The sample catalog shipped for demos and offline use.

use chrono::NaiveDate;

use crate::model::RawAudioRecord;

/// (id, file name, title, artist, genre label, seconds, upload date)
type SeedRow = (i64, &'static str, &'static str, &'static str, &'static str, u32, (i32, u32, u32));

const SEED: &[SeedRow] = &[
    (1, "sunset-dreams.mp3", "Sunset Dreams", "Electronic Beats", "Electronic", 185, (2024, 1, 15)),
    (2, "morning-coffee.mp3", "Morning Coffee", "Instrumental Collective", "Instrumental", 210, (2024, 1, 14)),
    (3, "epic-journey.mp3", "Epic Journey", "Orchestral Masters", "Classical", 240, (2024, 1, 13)),
    (4, "city-lights.mp3", "City Lights", "Urban Vibes", "Hip-Hop", 195, (2024, 1, 12)),
    (5, "thunder-strike.mp3", "Thunder Strike", "Rock Legends", "Rock", 220, (2024, 1, 11)),
    (6, "ancient-echoes.mp3", "Ancient Echoes", "Historic Sounds", "Old-Time Historic", 200, (2024, 1, 10)),
    (9, "folk-tales.mp3", "Folk Tales", "Acoustic Wanderers", "Folk", 190, (2024, 1, 7)),
    (12, "experimental-soundscape.mp3", "Experimental Soundscape", "Avant-Garde Artists", "Experimental", 300, (2024, 1, 4)),
];

/// The sample records, newest first.
pub fn seed_records() -> Vec<RawAudioRecord> {
    SEED.iter()
        .map(|&(id, file, title, artist, genre, seconds, (y, m, d))| {
            let mut record = RawAudioRecord::new(id, file)
                .with_title(title)
                .with_artist(artist)
                .with_genre(genre)
                .with_duration(seconds);
            record.uploaded_at = NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc());
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Adapter;
    use crate::normalize::{classify, Resolution};
    use crate::taxonomy::{Genre, Taxonomy};
    use std::collections::HashSet;

    #[test]
    fn test_seed_covers_every_genre() {
        let genres: HashSet<Genre> = seed_records()
            .iter()
            .map(|r| classify(r.detected_genre.as_deref()).genre)
            .collect();
        assert_eq!(genres.len(), Genre::ALL.len());
    }

    #[test]
    fn test_seed_labels_are_canonical() {
        for record in seed_records() {
            let resolved = classify(record.detected_genre.as_deref());
            assert_eq!(resolved.resolution, Resolution::Canonical);
        }
    }

    #[test]
    fn test_seed_adapts_cleanly_with_unique_ids() {
        let items = Adapter::new(Taxonomy::builtin())
            .adapt_all(&seed_records())
            .unwrap();
        let ids: HashSet<_> = items.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), items.len());
        assert!(items.iter().all(|m| m.uploaded_at.is_some()));
    }

    #[test]
    fn test_seed_is_newest_first() {
        let records = seed_records();
        assert!(records
            .windows(2)
            .all(|w| w[0].uploaded_at >= w[1].uploaded_at));
    }
}
