/// Solscan API client
///
/// API Documentation: https://public-api.solscan.io/docs/
///
/// Endpoints implemented:
/// 1. /token/meta?tokenAddress={mint} - Token metadata

pub mod types;

use self::types::SolscanTokenMeta;
use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::error::ApiError;
use crate::apis::stats::ApiStatsTracker;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// API CONFIGURATION - Hardcoded for Solscan API
// ============================================================================

const SOLSCAN_BASE_URL: &str = "https://public-api.solscan.io";

/// Request timeout
const TIMEOUT_SECS: u64 = 15;

/// Default rate limit when config leaves it at 0
pub const RATE_LIMIT_PER_MINUTE: usize = 30;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct SolscanClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    stats: Arc<ApiStatsTracker>,
    api_key: String,
    enabled: bool,
}

impl SolscanClient {
    /// The `token` auth header is optional on the public tier
    pub fn new(enabled: bool, api_key: String, max_per_minute: usize) -> Result<Self, String> {
        let rate = if max_per_minute == 0 {
            RATE_LIMIT_PER_MINUTE
        } else {
            max_per_minute
        };

        Ok(Self {
            http_client: HttpClient::new(TIMEOUT_SECS)?,
            rate_limiter: RateLimiter::new(rate),
            stats: Arc::new(ApiStatsTracker::new()),
            api_key,
            enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get_stats(&self) -> super::stats::ApiStats {
        self.stats.get_stats().await
    }

    /// Fetch metadata for a mint address
    ///
    /// A response with no symbol and no name is treated as "token unknown"
    /// and surfaces as [`ApiError::NotFound`].
    pub async fn fetch_token_meta(&self, mint: &str) -> Result<SolscanTokenMeta, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let _guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(ApiError::NetworkError)?;

        let start = Instant::now();
        let url = format!("{}/token/meta?tokenAddress={}", SOLSCAN_BASE_URL, mint);

        let mut request = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json");

        if !self.api_key.is_empty() {
            request = request.header("token", &self.api_key);
        }

        let response = request.send().await.map_err(ApiError::from_reqwest)?;

        let elapsed = start.elapsed().as_millis() as f64;

        if !response.status().is_success() {
            self.stats.record_request(false, elapsed).await;
            return Err(ApiError::from_status(response.status()));
        }

        let meta: SolscanTokenMeta = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        if meta.symbol.is_none() && meta.name.is_none() {
            return Err(ApiError::NotFound);
        }

        Ok(meta)
    }
}
