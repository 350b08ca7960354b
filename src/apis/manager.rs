/// Global API manager singleton - ensures a single instance of every
/// upstream client across the service.
/// This provides centralized rate limiting and stats tracking per API.
use std::sync::{Arc, LazyLock};

use crate::config::get_config;
use crate::logger::{self, LogTag};

use super::birdeye::{BirdeyeClient, RATE_LIMIT_PER_MINUTE as BIRDEYE_RATE_LIMIT};
use super::coingecko::{CoinGeckoClient, RATE_LIMIT_PER_MINUTE as COINGECKO_RATE_LIMIT};
use super::helius::{HeliusClient, RATE_LIMIT_PER_MINUTE as HELIUS_RATE_LIMIT};
use super::jupiter::{JupiterClient, RATE_LIMIT_PER_MINUTE as JUPITER_RATE_LIMIT};
use super::solscan::{SolscanClient, RATE_LIMIT_PER_MINUTE as SOLSCAN_RATE_LIMIT};
use super::stats::ApiStats;

/// Global API manager - holds all upstream clients with their individual
/// rate limiters and stats trackers
pub struct ApiManager {
    pub helius: HeliusClient,
    pub jupiter: JupiterClient,
    pub birdeye: BirdeyeClient,
    pub coingecko: CoinGeckoClient,
    pub solscan: SolscanClient,
}

impl ApiManager {
    fn new() -> Self {
        let cfg = get_config();

        logger::info(LogTag::Api, "Initializing global API manager");

        Self {
            helius: HeliusClient::new(
                cfg.helius.enabled,
                cfg.helius.api_key.clone(),
                cfg.helius.max_requests_per_minute,
            )
            .unwrap_or_else(|e| {
                logger::warning(
                    LogTag::Api,
                    &format!(
                        "Failed to initialize Helius client: {} - using disabled client",
                        e
                    ),
                );
                HeliusClient::new(false, String::new(), HELIUS_RATE_LIMIT)
                    .expect("Failed to create disabled Helius client")
            }),
            jupiter: JupiterClient::new(cfg.jupiter.enabled, cfg.jupiter.max_requests_per_minute)
                .unwrap_or_else(|e| {
                    logger::warning(
                        LogTag::Api,
                        &format!(
                            "Failed to initialize Jupiter client: {} - using disabled client",
                            e
                        ),
                    );
                    JupiterClient::new(false, JUPITER_RATE_LIMIT)
                        .expect("Failed to create disabled Jupiter client")
                }),
            birdeye: BirdeyeClient::new(
                cfg.birdeye.enabled,
                cfg.birdeye.api_key.clone(),
                cfg.birdeye.max_requests_per_minute,
            )
            .unwrap_or_else(|e| {
                logger::warning(
                    LogTag::Api,
                    &format!(
                        "Failed to initialize Birdeye client: {} - using disabled client",
                        e
                    ),
                );
                BirdeyeClient::new(false, String::new(), BIRDEYE_RATE_LIMIT)
                    .expect("Failed to create disabled Birdeye client")
            }),
            coingecko: CoinGeckoClient::new(
                cfg.coingecko.enabled,
                cfg.coingecko.api_key.clone(),
                cfg.coingecko.max_requests_per_minute,
            )
            .unwrap_or_else(|e| {
                logger::warning(
                    LogTag::Api,
                    &format!(
                        "Failed to initialize CoinGecko client: {} - using disabled client",
                        e
                    ),
                );
                CoinGeckoClient::new(false, String::new(), COINGECKO_RATE_LIMIT)
                    .expect("Failed to create disabled CoinGecko client")
            }),
            solscan: SolscanClient::new(
                cfg.solscan.enabled,
                cfg.solscan.api_key.clone(),
                cfg.solscan.max_requests_per_minute,
            )
            .unwrap_or_else(|e| {
                logger::warning(
                    LogTag::Api,
                    &format!(
                        "Failed to initialize Solscan client: {} - using disabled client",
                        e
                    ),
                );
                SolscanClient::new(false, String::new(), SOLSCAN_RATE_LIMIT)
                    .expect("Failed to create disabled Solscan client")
            }),
        }
    }

    /// Get aggregated stats from all upstream clients
    pub async fn get_all_stats(&self) -> ApiManagerStats {
        ApiManagerStats {
            helius: self.helius.get_stats().await,
            jupiter: self.jupiter.get_stats().await,
            birdeye: self.birdeye.get_stats().await,
            coingecko: self.coingecko.get_stats().await,
            solscan: self.solscan.get_stats().await,
        }
    }
}

/// Aggregated stats from all upstream clients
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiManagerStats {
    pub helius: ApiStats,
    pub jupiter: ApiStats,
    pub birdeye: ApiStats,
    pub coingecko: ApiStats,
    pub solscan: ApiStats,
}

/// Global singleton instance - lazy initialized on first access
/// Only ONE instance of each upstream client exists across the service, so
/// rate limiting and stats tracking are truly global
static GLOBAL_API_MANAGER: LazyLock<Arc<ApiManager>> =
    LazyLock::new(|| Arc::new(ApiManager::new()));

/// Get the global API manager (creates the singleton on first call)
pub fn get_api_manager() -> Arc<ApiManager> {
    GLOBAL_API_MANAGER.clone()
}
