/// Birdeye API client
///
/// API Documentation: https://docs.birdeye.so/
///
/// Endpoints implemented:
/// 1. /public/price?address={mint} - USD price lookup

pub mod types;

use self::types::BirdeyePriceResponse;
use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::error::ApiError;
use crate::apis::stats::ApiStatsTracker;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// API CONFIGURATION - Hardcoded for Birdeye API
// ============================================================================

const BIRDEYE_BASE_URL: &str = "https://public-api.birdeye.so";

/// Request timeout
const TIMEOUT_SECS: u64 = 15;

/// Default rate limit when config leaves it at 0
pub const RATE_LIMIT_PER_MINUTE: usize = 50;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct BirdeyeClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    stats: Arc<ApiStatsTracker>,
    api_key: String,
    enabled: bool,
}

impl BirdeyeClient {
    /// Birdeye requires an X-API-KEY header; without a key the client is
    /// disabled and calls return [`ApiError::Disabled`].
    pub fn new(enabled: bool, api_key: String, max_per_minute: usize) -> Result<Self, String> {
        let rate = if max_per_minute == 0 {
            RATE_LIMIT_PER_MINUTE
        } else {
            max_per_minute
        };

        let enabled = enabled && !api_key.is_empty();

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

    /// Fetch the USD price for a single mint
    pub async fn fetch_price(&self, mint: &str) -> Result<f64, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let _guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(ApiError::NetworkError)?;

        let start = Instant::now();
        let url = format!("{}/public/price?address={}", BIRDEYE_BASE_URL, mint);

        let response = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json")
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let elapsed = start.elapsed().as_millis() as f64;

        if !response.status().is_success() {
            self.stats.record_request(false, elapsed).await;
            return Err(ApiError::from_status(response.status()));
        }

        let parsed: BirdeyePriceResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        // success=false or a missing data object both mean "no price here"
        if !parsed.success {
            return Err(ApiError::NotFound);
        }

        parsed
            .data
            .map(|data| data.value)
            .ok_or(ApiError::NotFound)
    }
}
