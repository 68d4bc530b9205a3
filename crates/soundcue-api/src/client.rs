//! HTTP client for the catalog backend.
//!
//! The backend stores uploaded audio, classifies it, and exposes a small
//! JSON API under `/api/v1`. This client covers the read side of that API:
//! search, single-file lookup, aggregate statistics and the health check.
//! Records come back as [`RawAudioRecord`]s for the adapter to consume.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use soundcue_core::{normalize, Genre, RawAudioRecord};

use crate::error::{ApiError, ApiResult};

const API_PREFIX: &str = "/api/v1";

/// Largest page the backend will serve from `/search`.
pub const MAX_PAGE_SIZE: u32 = 1000;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Filters for `GET /api/v1/search`. Unset fields are left off the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    /// Exact backend genre label, e.g. "Rock".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Substring of the original filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl SearchParams {
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.min(MAX_PAGE_SIZE));
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub files: Vec<RawAudioRecord>,
}

/// Aggregate numbers from `GET /api/v1/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_size_bytes: u64,
    #[serde(default)]
    pub total_size_mb: f64,
    /// Counts keyed by the backend's raw genre labels.
    #[serde(default)]
    pub genre_distribution: BTreeMap<String, u64>,
}

impl StatsResponse {
    /// The backend distribution folded into canonical genres.
    ///
    /// Every canonical genre is present; labels that normalize to the same
    /// genre are summed.
    #[must_use]
    pub fn canonical_distribution(&self) -> BTreeMap<Genre, u64> {
        let mut out: BTreeMap<Genre, u64> = Genre::ALL.iter().map(|g| (*g, 0)).collect();
        for (label, count) in &self.genre_distribution {
            *out.entry(normalize(Some(label))).or_default() += count;
        }
        out
    }
}

/// Liveness report from `GET /health`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub minio_connected: bool,
    #[serde(default)]
    pub database_connected: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.database_connected
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Catalog backend client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url` (e.g.
    /// `http://localhost:8000`). A trailing slash is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("soundcue/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One page of records matching `params`.
    pub async fn search(&self, params: &SearchParams) -> ApiResult<SearchResponse> {
        let endpoint = format!("{API_PREFIX}/search");
        log::debug!("searching backend: {params:?}");
        self.get_json(&endpoint, Some(params)).await
    }

    /// Every record the backend will return in one maximum-size page.
    pub async fn all_files(&self) -> ApiResult<Vec<RawAudioRecord>> {
        let params = SearchParams::default().with_limit(MAX_PAGE_SIZE);
        let page = self.search(&params).await?;
        if page.total > page.files.len() as u64 {
            log::warn!(
                "backend holds {} records, only {} fetched",
                page.total,
                page.files.len()
            );
        }
        Ok(page.files)
    }

    /// A single record, or `None` when the backend has no such id.
    ///
    /// Backend ids are integers: anything else cannot name a record and is
    /// answered with `None` without a request.
    pub async fn file(&self, id: &str) -> ApiResult<Option<RawAudioRecord>> {
        let Ok(id) = id.trim().parse::<i64>() else {
            log::debug!("{id:?} is not a backend file id");
            return Ok(None);
        };
        let endpoint = format!("{API_PREFIX}/files/{id}");
        match self.get_json(&endpoint, None::<&()>).await {
            Ok(record) => Ok(Some(record)),
            Err(ApiError::Http {
                status: 404 | 422, ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn stats(&self) -> ApiResult<StatsResponse> {
        self.get_json(&format!("{API_PREFIX}/stats"), None::<&()>)
            .await
    }

    pub async fn health(&self) -> ApiResult<HealthResponse> {
        self.get_json("/health", None::<&()>).await
    }

    async fn get_json<T, Q>(&self, endpoint: &str, query: Option<&Q>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{endpoint}", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited {
                endpoint: endpoint.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_body(endpoint, &body)
    }
}

fn parse_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
