//! Record sources.
//!
//! A [`MusicSource`] yields the raw records a catalog is built from. Which
//! source runs is decided once at startup from [`Config::source`]; nothing
//! downstream of [`open_source`] knows or cares which one it got.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};

use soundcue_core::seed::seed_records;
use soundcue_core::RawAudioRecord;

use crate::client::BackendClient;
use crate::config::{Config, SourceKind};
use crate::error::ApiResult;

/// Something that can produce the raw records for a catalog.
#[async_trait]
pub trait MusicSource: Send + Sync + fmt::Debug {
    /// Short name for logs and status output.
    fn name(&self) -> &str;

    /// Fetch every record this source holds.
    async fn load(&self) -> ApiResult<Vec<RawAudioRecord>>;
}

/// The sample catalog bundled with soundcue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

#[async_trait]
impl MusicSource for SeedSource {
    fn name(&self) -> &str {
        "seed"
    }

    async fn load(&self) -> ApiResult<Vec<RawAudioRecord>> {
        Ok(seed_records())
    }
}

/// Records fetched from the catalog backend, retrying transient failures.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: BackendClient,
    max_retries: usize,
    min_delay: Duration,
}

impl RemoteSource {
    pub const DEFAULT_MAX_RETRIES: usize = 3;

    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            min_delay: Duration::from_millis(500),
        }
    }

    /// Number of retries after the first attempt; 0 disables retrying.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_times(self.max_retries)
    }
}

#[async_trait]
impl MusicSource for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn load(&self) -> ApiResult<Vec<RawAudioRecord>> {
        let records = (|| async { self.client.all_files().await })
            .retry(self.backoff())
            .when(|e| e.is_transient())
            .notify(|e, delay| {
                log::warn!(
                    "backend at {} failed ({e}); retrying in {delay:?}",
                    self.client.base_url()
                );
            })
            .await?;
        log::info!(
            "loaded {} records from {}",
            records.len(),
            self.client.base_url()
        );
        Ok(records)
    }
}

/// Build the source selected by `config`.
pub fn open_source(config: &Config) -> ApiResult<Box<dyn MusicSource>> {
    let source: Box<dyn MusicSource> = match config.source {
        SourceKind::Seed => Box::new(SeedSource),
        SourceKind::Remote => Box::new(RemoteSource::new(BackendClient::new(
            config.api_url.clone(),
        )?)),
    };
    log::debug!("using {} source", source.name());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_seed_source_loads_sample_catalog() {
        let records = SeedSource.load().await.unwrap();
        assert_eq!(records.len(), seed_records().len());
        assert!(!records.is_empty());
    }

    #[test]
    fn test_open_source_follows_config() {
        let seed = open_source(&Config::default()).unwrap();
        assert_eq!(seed.name(), "seed");

        let config = Config {
            source: SourceKind::Remote,
            ..Config::default()
        };
        let remote = open_source(&config).unwrap();
        assert_eq!(remote.name(), "remote");
    }

    #[tokio::test]
    async fn test_remote_source_unreachable_backend() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = BackendClient::new("http://127.0.0.1:9").unwrap();
        let source = RemoteSource::new(client)
            .with_max_retries(1)
            .with_min_delay(Duration::from_millis(1));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, ApiError::Request(_)));
    }
}
