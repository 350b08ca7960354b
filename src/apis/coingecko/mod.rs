/// CoinGecko API client
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Endpoints implemented:
/// 1. /api/v3/simple/token_price/solana - USD price by contract address
/// 2. /api/v3/simple/price?ids=solana - Native SOL price

pub mod types;

use self::types::TokenPriceResponse;
use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::error::ApiError;
use crate::apis::stats::ApiStatsTracker;
use crate::constants::{NATIVE_SOL_MINT, SOL_MINT};
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// API CONFIGURATION - Hardcoded for CoinGecko API
// ============================================================================

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Request timeout - CoinGecko can be slow, 20s recommended
const TIMEOUT_SECS: u64 = 20;

/// Default rate limit when config leaves it at 0 (demo tier is throttled hard)
pub const RATE_LIMIT_PER_MINUTE: usize = 30;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct CoinGeckoClient {
    http_client: HttpClient,
    rate_limiter: RateLimiter,
    stats: Arc<ApiStatsTracker>,
    api_key: String,
    enabled: bool,
}

impl CoinGeckoClient {
    /// The demo key header is optional; a keyless client stays enabled on
    /// the public (heavily throttled) tier.
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

    /// Fetch the USD price for a mint
    ///
    /// Native/wrapped SOL is special-cased through /simple/price since it has
    /// no contract address on the token_price surface.
    pub async fn fetch_price(&self, mint: &str) -> Result<f64, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        if mint == SOL_MINT || mint == NATIVE_SOL_MINT {
            return self.fetch_sol_price().await;
        }

        let url = format!(
            "{}/simple/token_price/solana?contract_addresses={}&vs_currencies=usd",
            COINGECKO_BASE_URL, mint
        );
        let parsed = self.get_price_map(&url).await?;

        parsed.usd_price_for(mint).ok_or(ApiError::NotFound)
    }

    /// Fetch the native SOL price via /simple/price
    async fn fetch_sol_price(&self) -> Result<f64, ApiError> {
        let url = format!(
            "{}/simple/price?ids=solana&vs_currencies=usd",
            COINGECKO_BASE_URL
        );
        let parsed = self.get_price_map(&url).await?;

        parsed.usd_price_for("solana").ok_or(ApiError::NotFound)
    }

    async fn get_price_map(&self, url: &str) -> Result<TokenPriceResponse, ApiError> {
        let _guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(ApiError::NetworkError)?;

        let start = Instant::now();

        let mut request = self
            .http_client
            .client()
            .get(url)
            .header("Accept", "application/json");

        if !self.api_key.is_empty() {
            request = request.header("x-cg-demo-api-key", &self.api_key);
        }

        let response = request.send().await.map_err(ApiError::from_reqwest)?;

        let elapsed = start.elapsed().as_millis() as f64;

        if !response.status().is_success() {
            self.stats.record_request(false, elapsed).await;
            return Err(ApiError::from_status(response.status()));
        }

        let parsed: TokenPriceResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        Ok(parsed)
    }
}
