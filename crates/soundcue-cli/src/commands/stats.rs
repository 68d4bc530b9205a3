use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use soundcue_api::{BackendClient, Config, SourceKind, StatsResponse};
use soundcue_core::Genre;

use super::{load_catalog, print_json};

#[derive(Debug, Serialize)]
struct StatsReport {
    source: SourceKind,
    tracks: usize,
    genres: BTreeMap<Genre, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backend: Option<BackendTotals>,
}

#[derive(Debug, Serialize)]
struct BackendTotals {
    total_files: u64,
    total_size_mb: f64,
    genres: BTreeMap<Genre, u64>,
}

impl From<StatsResponse> for BackendTotals {
    fn from(stats: StatsResponse) -> Self {
        Self {
            genres: stats.canonical_distribution(),
            total_files: stats.total_files,
            total_size_mb: stats.total_size_mb,
        }
    }
}

/// Per-genre counts over the loaded catalog, plus backend totals when
/// running against the backend.
pub async fn show_stats(config: &Config, json: bool) -> Result<()> {
    let taxonomy = config.taxonomy()?;
    let catalog = load_catalog(config, &taxonomy).await?;

    let backend = match config.source {
        SourceKind::Remote => {
            let client = BackendClient::new(config.api_url.clone())?;
            let stats = client.stats().await.context("Failed to fetch backend stats")?;
            Some(BackendTotals::from(stats))
        }
        SourceKind::Seed => None,
    };

    let report = StatsReport {
        source: config.source,
        tracks: catalog.len(),
        genres: catalog.genre_distribution(),
        backend,
    };

    if json {
        return print_json(&report);
    }

    println!("\nSoundcue Catalog ({} source)\n", report.source);
    println!("  Tracks: {}\n", report.tracks);
    for (genre, count) in &report.genres {
        println!("  {:<18} {count:>5}", genre.name());
    }

    if let Some(backend) = &report.backend {
        println!("\nBackend ({})\n", config.api_url);
        println!("  Files: {}", backend.total_files);
        println!("  Size:  {:.2} MB\n", backend.total_size_mb);
        for (genre, count) in &backend.genres {
            println!("  {:<18} {count:>5}", genre.name());
        }
    }
    Ok(())
}

pub async fn show_health(config: &Config, json: bool) -> Result<()> {
    let client = BackendClient::new(config.api_url.clone())?;
    let health = client
        .health()
        .await
        .with_context(|| format!("Backend at {} did not answer", config.api_url))?;

    if json {
        return print_json(&health);
    }

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    println!("Backend: {}", config.api_url);
    println!("  status:    {}", health.status);
    println!("  device:    {}", health.device.as_deref().unwrap_or("<unknown>"));
    println!("  model:     {}", yes_no(health.model_loaded));
    println!("  storage:   {}", yes_no(health.minio_connected));
    println!("  database:  {}", yes_no(health.database_connected));

    if !health.is_healthy() {
        anyhow::bail!("Backend reports an unhealthy state");
    }
    Ok(())
}
