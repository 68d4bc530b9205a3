//! Catalog browsing commands.

use anyhow::{bail, Result};
use serde::Serialize;

use soundcue_api::{BackendClient, Config, SourceKind};
use soundcue_core::{Genre, MusicViewModel, VideoContext};

use super::{adapter, load_catalog, print_json, print_tracks};

#[derive(Debug, Serialize)]
struct GenreEntry {
    genre: Genre,
    slug: String,
    contexts: Vec<VideoContext>,
}

#[derive(Debug, Serialize)]
struct ContextEntry {
    context: VideoContext,
    label: &'static str,
    description: &'static str,
    genres: Vec<Genre>,
}

pub fn list_genres(config: &Config, json: bool) -> Result<()> {
    let taxonomy = config.taxonomy()?;
    let entries: Vec<GenreEntry> = Genre::ALL
        .iter()
        .map(|&genre| GenreEntry {
            genre,
            slug: genre.slug(),
            contexts: taxonomy.contexts_for(genre).to_vec(),
        })
        .collect();

    if json {
        return print_json(&entries);
    }

    for entry in &entries {
        let contexts: Vec<&str> = entry.contexts.iter().map(|c| c.slug()).collect();
        println!("{:<18} {}", entry.genre, contexts.join(", "));
    }
    Ok(())
}

pub fn list_contexts(config: &Config, json: bool) -> Result<()> {
    let taxonomy = config.taxonomy()?;
    let entries: Vec<ContextEntry> = VideoContext::ALL
        .iter()
        .map(|&context| ContextEntry {
            context,
            label: context.label(),
            description: context.description(),
            genres: taxonomy.genres_for(context).to_vec(),
        })
        .collect();

    if json {
        return print_json(&entries);
    }

    for entry in &entries {
        let genres: Vec<&str> = entry.genres.iter().map(|g| g.name()).collect();
        println!("{:<12} {}", entry.context.slug(), entry.description);
        println!("{:<12} {}", "", genres.join(", "));
    }
    Ok(())
}

pub async fn all(config: &Config, json: bool) -> Result<()> {
    let taxonomy = config.taxonomy()?;
    let catalog = load_catalog(config, &taxonomy).await?;
    let tracks: Vec<&MusicViewModel> = catalog.all_music().iter().collect();
    emit_tracks(&tracks, json)
}

pub async fn by_genre(config: &Config, name: &str, json: bool) -> Result<()> {
    let genre = parse_genre(name)?;
    let taxonomy = config.taxonomy()?;
    let catalog = load_catalog(config, &taxonomy).await?;
    emit_tracks(&catalog.by_genre(genre), json)
}

pub async fn by_context(config: &Config, slug: &str, json: bool) -> Result<()> {
    let context = parse_context(slug)?;
    let taxonomy = config.taxonomy()?;
    let catalog = load_catalog(config, &taxonomy).await?;
    emit_tracks(&catalog.by_context(context), json)
}

pub async fn search(config: &Config, query: &str, json: bool) -> Result<()> {
    let taxonomy = config.taxonomy()?;
    let catalog = load_catalog(config, &taxonomy).await?;
    emit_tracks(&catalog.search(query), json)
}

/// Show one track. Against the backend this is a single-record fetch
/// rather than a full catalog load.
pub async fn show(config: &Config, id: &str, json: bool) -> Result<()> {
    let taxonomy = config.taxonomy()?;

    let track = match config.source {
        SourceKind::Remote => {
            let client = BackendClient::new(config.api_url.clone())?;
            match client.file(id).await? {
                Some(raw) => Some(adapter(config, &taxonomy)?.adapt(&raw)?),
                None => None,
            }
        }
        SourceKind::Seed => load_catalog(config, &taxonomy).await?.by_id(id).cloned(),
    };

    let Some(track) = track else {
        if json {
            println!("null");
        } else {
            println!("No track with id {id}.");
        }
        return Ok(());
    };

    if json {
        return print_json(&track);
    }

    println!("{}", track.title);
    println!("  id:        {}", track.id);
    println!("  artist:    {}", track.artist);
    println!("  genre:     {}", track.genre);
    println!("  duration:  {}", track.duration_display());
    if let Some(uploaded_at) = track.uploaded_at {
        println!("  uploaded:  {}", uploaded_at.format("%Y-%m-%d %H:%M"));
    }
    println!("  stream:    {}", track.audio_url);
    if let Some(cover_url) = &track.cover_url {
        println!("  cover:     {cover_url}");
    }
    let contexts: Vec<&str> = track.suggested_contexts.iter().map(|c| c.slug()).collect();
    println!("  fits:      {}", contexts.join(", "));
    Ok(())
}

fn emit_tracks(tracks: &[&MusicViewModel], json: bool) -> Result<()> {
    if json {
        return print_json(tracks);
    }
    print_tracks(tracks);
    Ok(())
}

/// Display name first, then slug.
fn parse_genre(name: &str) -> Result<Genre> {
    if let Some(genre) = name.parse::<Genre>().ok().or_else(|| Genre::from_slug(name)) {
        return Ok(genre);
    }
    let valid: Vec<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
    bail!("Unknown genre: {name}\n\nValid genres: {}", valid.join(", "))
}

fn parse_context(slug: &str) -> Result<VideoContext> {
    if let Ok(context) = slug.parse::<VideoContext>() {
        return Ok(context);
    }
    let valid: Vec<&str> = VideoContext::ALL.iter().map(|c| c.slug()).collect();
    bail!("Unknown context: {slug}\n\nValid contexts: {}", valid.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genre_accepts_name_and_slug() {
        assert_eq!(parse_genre("Hip-Hop").unwrap(), Genre::HipHop);
        assert_eq!(parse_genre("old-time-historic").unwrap(), Genre::OldTimeHistoric);
        assert!(parse_genre("Jazz").is_err());
    }

    #[test]
    fn test_parse_context() {
        assert_eq!(parse_context("wedding").unwrap(), VideoContext::Wedding);
        let err = parse_context("birthday").unwrap_err().to_string();
        assert!(err.contains("Valid contexts"));
    }
}
