/// Token decimals resolution with caching
///
/// Sources, in order: the cached token list entry, the getTokenSupply RPC
/// call, and finally a default of 9. Results (including the default) are
/// memoized so a mint is resolved at most once per process.
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::arguments::is_debug_decimals_enabled;
use crate::constants::{DEFAULT_TOKEN_DECIMALS, SOL_DECIMALS, SOL_MINT};
use crate::logger::{self, LogTag};
use crate::rpc;

/// Unbounded mint -> decimals memoization
static DECIMALS_CACHE: Lazy<Mutex<HashMap<String, u8>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Get a mint's decimal count, consulting caches before the chain
pub async fn get_token_decimals(mint: &str) -> u8 {
    if mint == SOL_MINT {
        return SOL_DECIMALS;
    }

    if let Some(decimals) = get_cached_decimals(mint) {
        return decimals;
    }

    // Token list entry first - it is already in memory once warmed
    if let Ok(list) = crate::tokens::get_token_list().await {
        if let Some(token) = list.iter().find(|t| t.mint == mint) {
            cache_decimals(mint, token.decimals);
            return token.decimals;
        }
    }

    if is_debug_decimals_enabled() {
        logger::debug(
            LogTag::Decimals,
            &format!("Mint {} not in token list, asking RPC", mint),
        );
    }

    match rpc::get_token_supply_decimals(mint).await {
        Ok(decimals) => {
            cache_decimals(mint, decimals);
            decimals
        }
        Err(e) => {
            logger::warning(
                LogTag::Decimals,
                &format!(
                    "Failed to resolve decimals for {}, using default {}: {}",
                    mint, DEFAULT_TOKEN_DECIMALS, e
                ),
            );
            // Cache the default too so a dead mint is not re-queried
            cache_decimals(mint, DEFAULT_TOKEN_DECIMALS);
            DEFAULT_TOKEN_DECIMALS
        }
    }
}

/// Get decimals from cache only (no lookups)
pub fn get_cached_decimals(mint: &str) -> Option<u8> {
    DECIMALS_CACHE.lock().ok()?.get(mint).copied()
}

/// Insert a known decimal count into the cache
pub fn cache_decimals(mint: &str, decimals: u8) {
    if let Ok(mut cache) = DECIMALS_CACHE.lock() {
        cache.insert(mint.to_string(), decimals);
    }
}

/// Clear the decimals cache
pub fn clear_decimals_cache() {
    if let Ok(mut cache) = DECIMALS_CACHE.lock() {
        cache.clear();
    }
}

/// Number of cached entries
pub fn cached_decimals_count() -> usize {
    DECIMALS_CACHE.lock().map(|c| c.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_operations() {
        clear_decimals_cache();
        assert_eq!(get_cached_decimals("test-mint"), None);

        cache_decimals("test-mint", 6);
        assert_eq!(get_cached_decimals("test-mint"), Some(6));
        assert_eq!(cached_decimals_count(), 1);

        clear_decimals_cache();
        assert_eq!(cached_decimals_count(), 0);
    }

    #[tokio::test]
    async fn test_sol_mint_short_circuits() {
        clear_decimals_cache();
        // SOL never touches cache, list, or RPC
        assert_eq!(get_token_decimals(SOL_MINT).await, SOL_DECIMALS);
        assert_eq!(cached_decimals_count(), 0);
    }
}
