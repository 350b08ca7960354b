/// USD price resolution with a linear provider fallback chain
///
/// Providers are tried in order Jupiter -> Birdeye -> CoinGecko. A provider
/// that is disabled or fails at the transport level is skipped; a provider
/// that answers but has no entry for the mint marks the mint as "seen" so
/// exhaustion resolves to NotFound instead of an upstream failure.
///
/// Successful lookups land in a TTL cache keyed by mint; an expired entry is
/// refetched through the chain.
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::apis::error::ApiError;
use crate::apis::manager::get_api_manager;
use crate::arguments::is_debug_prices_enabled;
use crate::config::get_config;
use crate::logger::{self, LogTag};

/// Resolved price ready for the /price response body
#[derive(Debug, Clone, Serialize)]
pub struct TokenPrice {
    pub mint: String,
    pub price_usd: f64,
    /// Which provider answered (or "cache")
    pub source: String,
    pub cached: bool,
}

/// Why the chain produced no price
#[derive(Debug, Clone)]
pub enum PriceError {
    /// At least one provider answered but none had an entry for the mint
    NotFound,
    /// Every provider failed at the transport/HTTP level
    Upstream(String),
}

impl std::fmt::Display for PriceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceError::NotFound => write!(f, "No price data for mint"),
            PriceError::Upstream(msg) => write!(f, "All price providers failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    price_usd: f64,
    source: String,
    fetched_at: Instant,
}

/// Mint -> price memoization with TTL expiry
static PRICE_CACHE: Lazy<RwLock<HashMap<String, CacheEntry>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn is_fresh(entry: &CacheEntry, ttl: Duration) -> bool {
    entry.fetched_at.elapsed() < ttl
}

fn cache_lookup(mint: &str, ttl: Duration) -> Option<TokenPrice> {
    let cache = PRICE_CACHE.read().ok()?;
    let entry = cache.get(mint)?;

    if !is_fresh(entry, ttl) {
        return None;
    }

    Some(TokenPrice {
        mint: mint.to_string(),
        price_usd: entry.price_usd,
        source: entry.source.clone(),
        cached: true,
    })
}

fn cache_store(mint: &str, price_usd: f64, source: &str) {
    if let Ok(mut cache) = PRICE_CACHE.write() {
        cache.insert(
            mint.to_string(),
            CacheEntry {
                price_usd,
                source: source.to_string(),
                fetched_at: Instant::now(),
            },
        );
    }
}

/// Drop every cached price (used by tests)
pub fn clear_price_cache() {
    if let Ok(mut cache) = PRICE_CACHE.write() {
        cache.clear();
    }
}

/// Resolve the USD price for a mint through cache and fallback chain
pub async fn get_price_for_mint(mint: &str) -> Result<TokenPrice, PriceError> {
    let ttl = Duration::from_secs(get_config().prices.cache_ttl_secs);

    if let Some(hit) = cache_lookup(mint, ttl) {
        if is_debug_prices_enabled() {
            logger::debug(
                LogTag::Prices,
                &format!("Cache hit for {} (${})", mint, hit.price_usd),
            );
        }
        return Ok(hit);
    }

    let manager = get_api_manager();
    let mut chain = FallbackChain::new();

    for source in ["jupiter", "birdeye", "coingecko"] {
        let outcome = match source {
            "jupiter" => manager.jupiter.fetch_price(mint).await,
            "birdeye" => manager.birdeye.fetch_price(mint).await,
            _ => manager.coingecko.fetch_price(mint).await,
        };

        if let Some(price_usd) = chain.absorb(source, outcome) {
            if is_debug_prices_enabled() {
                logger::debug(
                    LogTag::Prices,
                    &format!("{} priced {} at ${}", source, mint, price_usd),
                );
            }
            cache_store(mint, price_usd, source);
            return Ok(TokenPrice {
                mint: mint.to_string(),
                price_usd,
                source: source.to_string(),
                cached: false,
            });
        }
    }

    let error = chain.exhausted();
    logger::warning(
        LogTag::Prices,
        &format!("Price chain exhausted for {}: {}", mint, error),
    );
    Err(error)
}

// ============================================================================
// FALLBACK CHAIN BOOKKEEPING
// ============================================================================

/// Tracks how each provider in the chain answered so exhaustion resolves to
/// the right error: a provider that replied with no data makes the mint
/// "seen" and the chain ends in NotFound; otherwise the last transport-level
/// failure is surfaced as Upstream.
struct FallbackChain {
    seen_by_a_provider: bool,
    last_error: String,
}

impl FallbackChain {
    fn new() -> Self {
        Self {
            seen_by_a_provider: false,
            last_error: String::new(),
        }
    }

    /// Record one provider outcome; Some means the chain is done
    fn absorb(&mut self, source: &str, outcome: Result<f64, ApiError>) -> Option<f64> {
        match outcome {
            Ok(price_usd) => Some(price_usd),
            Err(ApiError::NotFound) => {
                // The provider answered; it just has nothing for this mint
                self.seen_by_a_provider = true;
                None
            }
            Err(ApiError::Disabled) => None,
            Err(e) => {
                self.last_error = format!("{}: {}", source, e);
                None
            }
        }
    }

    /// The error to report once every provider has been tried
    fn exhausted(self) -> PriceError {
        if self.seen_by_a_provider {
            PriceError::NotFound
        } else if self.last_error.is_empty() {
            // Every provider disabled counts as an upstream outage
            PriceError::Upstream("no price provider enabled".to_string())
        } else {
            PriceError::Upstream(self.last_error)
        }
    }
}
