pub mod browse;
pub mod config;
pub mod normalize;
pub mod stats;
pub mod taxonomy;

use anyhow::{Context, Result};
use serde::Serialize;

use soundcue_api::{open_source, Config};
use soundcue_core::{Adapter, Catalog, MusicViewModel, RawAudioRecord, Taxonomy};

/// Fetch raw records from the configured source.
pub async fn load_records(config: &Config) -> Result<Vec<RawAudioRecord>> {
    let source = open_source(config)?;
    source
        .load()
        .await
        .with_context(|| format!("Failed to load records from {} source", source.name()))
}

/// The adapter for this run: configured taxonomy and stream template.
pub fn adapter<'t>(config: &Config, taxonomy: &'t Taxonomy) -> Result<Adapter<'t>> {
    let stream_url = config
        .stream_url()
        .context("Invalid stream_url_template")?;
    Ok(Adapter::new(taxonomy).with_stream_url(stream_url))
}

pub async fn load_catalog<'t>(config: &Config, taxonomy: &'t Taxonomy) -> Result<Catalog<'t>> {
    let records = load_records(config).await?;
    let adapter = adapter(config, taxonomy)?;
    let catalog = Catalog::from_records(&records, &adapter)?;
    log::debug!("catalog holds {} tracks", catalog.len());
    Ok(catalog)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per track, or a note when there are none.
pub fn print_tracks(tracks: &[&MusicViewModel]) {
    if tracks.is_empty() {
        println!("No tracks found.");
        return;
    }

    for track in tracks {
        println!(
            "{:>6}  {:<30} {:<26} {:<18} {:>5}",
            track.id,
            truncate(&track.title, 30),
            truncate(&track.artist, 26),
            track.genre,
            track.duration_display()
        );
    }
    println!("\n{} track(s)", tracks.len());
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Sunset Dreams", 30), "Sunset Dreams");
        assert_eq!(truncate("Experimental Soundscape", 10), "Experimen…");
        assert_eq!(truncate("Café", 4), "Café");
    }

    #[tokio::test]
    async fn test_load_catalog_from_seed() {
        let config = Config::default();
        let catalog = load_catalog(&config, Taxonomy::builtin()).await.unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.by_id("1").is_some());
    }
}
