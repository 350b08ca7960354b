/// Helius API client
///
/// API Documentation: https://docs.helius.dev/
///
/// Endpoints implemented:
/// 1. /v0/addresses/{address}/balances - Native and SPL token balances

pub mod types;

use self::types::HeliusBalances;
use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::error::ApiError;
use crate::apis::stats::ApiStatsTracker;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// API CONFIGURATION - Hardcoded for Helius API
// ============================================================================

const HELIUS_BASE_URL: &str = "https://api.helius.xyz/v0";

/// Request timeout - balance lookups are a single account scan, 15s is plenty
const TIMEOUT_SECS: u64 = 15;

/// Default rate limit when config leaves it at 0
pub const RATE_LIMIT_PER_MINUTE: usize = 50;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct HeliusClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    stats: Arc<ApiStatsTracker>,
    api_key: String,
    enabled: bool,
}

impl HeliusClient {
    /// A client constructed without an API key is disabled; calls return
    /// [`ApiError::Disabled`] so the caller can fall through to plain RPC.
    pub fn new(enabled: bool, api_key: String, max_per_minute: usize) -> Result<Self, String> {
        let http_client = HttpClient::new(TIMEOUT_SECS)?;
        let rate = if max_per_minute == 0 {
            RATE_LIMIT_PER_MINUTE
        } else {
            max_per_minute
        };

        let enabled = enabled && !api_key.is_empty();

        Ok(Self {
            http_client,
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

    /// Fetch native and SPL token balances for a wallet address
    pub async fn fetch_balances(&self, address: &str) -> Result<HeliusBalances, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let _guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(ApiError::NetworkError)?;

        let start = Instant::now();
        let url = format!(
            "{}/addresses/{}/balances?api-key={}",
            HELIUS_BASE_URL, address, self.api_key
        );

        let response = self
            .http_client
            .client()
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let elapsed = start.elapsed().as_millis() as f64;

        if !response.status().is_success() {
            self.stats.record_request(false, elapsed).await;
            return Err(ApiError::from_status(response.status()));
        }

        let balances: HeliusBalances = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        Ok(balances)
    }
}
