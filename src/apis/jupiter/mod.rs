/// Jupiter API client
///
/// API Documentation: https://station.jup.ag/docs
///
/// Endpoints implemented:
/// 1. /price/v2?ids={mint} - USD price lookup
/// 2. https://token.jup.ag/strict - Curated token list
/// 3. /swap/v1/quote - Swap quote

pub mod types;

use self::types::{JupiterPriceResponse, JupiterQuote, TokenListEntry};
use crate::apis::client::{HttpClient, RateLimiter};
use crate::apis::error::ApiError;
use crate::apis::stats::ApiStatsTracker;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// API CONFIGURATION - Hardcoded for Jupiter API (all surfaces are keyless)
// ============================================================================

const JUPITER_LITE_BASE_URL: &str = "https://lite-api.jup.ag";

/// The strict list lives on its own host
const JUPITER_TOKEN_LIST_URL: &str = "https://token.jup.ag/strict";

/// Request timeout - Jupiter API is fast, 15s is sufficient
const TIMEOUT_SECS: u64 = 15;

/// The token list is a multi-megabyte document, give it more room
const TOKEN_LIST_TIMEOUT_SECS: u64 = 30;

/// Default rate limit when config leaves it at 0
pub const RATE_LIMIT_PER_MINUTE: usize = 60;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

pub struct JupiterClient {
    http_client: HttpClient,
    list_client: HttpClient,
    rate_limiter: RateLimiter,
    stats: Arc<ApiStatsTracker>,
    enabled: bool,
}

impl JupiterClient {
    pub fn new(enabled: bool, max_per_minute: usize) -> Result<Self, String> {
        let rate = if max_per_minute == 0 {
            RATE_LIMIT_PER_MINUTE
        } else {
            max_per_minute
        };

        Ok(Self {
            http_client: HttpClient::new(TIMEOUT_SECS)?,
            list_client: HttpClient::new(TOKEN_LIST_TIMEOUT_SECS)?,
            rate_limiter: RateLimiter::new(rate),
            stats: Arc::new(ApiStatsTracker::new()),
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
    ///
    /// Returns [`ApiError::NotFound`] when the API answers but has no entry
    /// for the mint (the data map carries null for unknown ids).
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
        let url = format!("{}/price/v2?ids={}", JUPITER_LITE_BASE_URL, mint);

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

        let parsed: JupiterPriceResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        parsed.price_for(mint).ok_or(ApiError::NotFound)
    }

    /// Fetch the strict token list (symbol, name, mint, decimals per entry)
    pub async fn fetch_token_list(&self) -> Result<Vec<TokenListEntry>, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let _guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(ApiError::NetworkError)?;

        let start = Instant::now();

        let response = self
            .list_client
            .client()
            .get(JUPITER_TOKEN_LIST_URL)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let elapsed = start.elapsed().as_millis() as f64;

        if !response.status().is_success() {
            self.stats.record_request(false, elapsed).await;
            return Err(ApiError::from_status(response.status()));
        }

        let tokens: Vec<TokenListEntry> = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        Ok(tokens)
    }

    /// Fetch a swap quote from /swap/v1/quote
    pub async fn fetch_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<JupiterQuote, ApiError> {
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
            "{}/swap/v1/quote?inputMint={}&outputMint={}&amount={}&slippageBps={}",
            JUPITER_LITE_BASE_URL, input_mint, output_mint, amount, slippage_bps
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

        let quote: JupiterQuote = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.record_request(false, elapsed).await;
                return Err(ApiError::InvalidResponse(e.to_string()));
            }
        };

        self.stats.record_request(true, elapsed).await;

        Ok(quote)
    }
}
