use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use crate::logger::{self, LogTag};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub rpc: RpcConfig,
    pub helius: ProviderConfig,
    pub jupiter: JupiterConfig,
    pub birdeye: ProviderConfig,
    pub coingecko: ProviderConfig,
    pub solscan: ProviderConfig,
    pub prices: PricesConfig,
    pub swap: SwapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub url: String,
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

/// Shared shape for key-gated upstream providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub max_requests_per_minute: usize,
}

/// Jupiter endpoints are keyless, so only throttling is configurable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JupiterConfig {
    pub enabled: bool,
    #[serde(default)]
    pub max_requests_per_minute: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesConfig {
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapConfig {
    pub slippage_bps: u16,
    /// Haircut applied by the local simulation fallback (50 = 0.5%)
    pub simulation_fee_bps: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            rpc: RpcConfig {
                url: "https://api.mainnet-beta.solana.com".to_string(),
                fallbacks: vec![],
            },
            helius: ProviderConfig {
                enabled: true,
                api_key: String::new(),
                max_requests_per_minute: 50,
            },
            jupiter: JupiterConfig {
                enabled: true,
                max_requests_per_minute: 60,
            },
            birdeye: ProviderConfig {
                enabled: true,
                api_key: String::new(),
                max_requests_per_minute: 50,
            },
            coingecko: ProviderConfig {
                enabled: true,
                api_key: String::new(),
                max_requests_per_minute: 30,
            },
            solscan: ProviderConfig {
                enabled: true,
                api_key: String::new(),
                max_requests_per_minute: 30,
            },
            prices: PricesConfig { cache_ttl_secs: 30 },
            swap: SwapConfig {
                slippage_bps: 50,
                simulation_fee_bps: 50,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    pub fn reload(&mut self, path: &str) -> Result<()> {
        *self = Self::load(path)?;
        Ok(())
    }
}

/// Process-wide configuration, loaded from the data directory on first use
static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| {
    let path = crate::paths::get_config_path();
    let config = match Config::load(&path.to_string_lossy()) {
        Ok(config) => config,
        Err(e) => {
            logger::warning(
                LogTag::System,
                &format!("Failed to load config, using defaults: {}", e),
            );
            Config::default()
        }
    };
    RwLock::new(config)
});

/// Get a snapshot of the current configuration
pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    }
}
