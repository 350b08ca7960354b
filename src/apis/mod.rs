/// Upstream API clients
///
/// One module per provider, each owning its base URL, timeout, rate limiter
/// and stats tracker. All clients are reached through the global manager so
/// rate limits and stats are shared process-wide.

pub mod birdeye;
pub mod client;
pub mod coingecko;
pub mod error;
pub mod helius;
pub mod jupiter;
pub mod manager;
pub mod solscan;
pub mod stats;

pub use client::{HttpClient, RateLimiter};
pub use error::ApiError;
pub use manager::{get_api_manager, ApiManager, ApiManagerStats};
pub use stats::{ApiStats, ApiStatsTracker};
