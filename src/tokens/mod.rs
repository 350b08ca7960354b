/// Token list cache and symbol resolution
///
/// The list is fetched from Jupiter's strict list on first access and then
/// memoized for the process lifetime - it is never refreshed. Resolution is
/// a flat linear search; exact symbol matches (case-insensitive) beat name
/// substring matches.

pub mod decimals;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::apis::error::ApiError;
use crate::apis::jupiter::types::TokenListEntry;
use crate::apis::manager::get_api_manager;
use crate::constants::{MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};
use crate::logger::{self, LogTag};

/// One cached token list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub mint: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub logo_uri: Option<String>,
}

impl From<TokenListEntry> for TokenInfo {
    fn from(entry: TokenListEntry) -> Self {
        Self {
            mint: entry.address,
            symbol: entry.symbol,
            name: entry.name,
            decimals: entry.decimals,
            logo_uri: entry.logo_uri,
        }
    }
}

/// Process-lifetime memoized token list
static TOKEN_LIST: Lazy<RwLock<Option<Arc<Vec<TokenInfo>>>>> = Lazy::new(|| RwLock::new(None));

/// Get the cached token list, fetching it on first access
pub async fn get_token_list() -> Result<Arc<Vec<TokenInfo>>, ApiError> {
    {
        let cached = TOKEN_LIST.read().await;
        if let Some(list) = cached.as_ref() {
            return Ok(Arc::clone(list));
        }
    }

    let mut cached = TOKEN_LIST.write().await;
    // Another task may have filled it while we waited for the write lock
    if let Some(list) = cached.as_ref() {
        return Ok(Arc::clone(list));
    }

    logger::info(LogTag::Tokens, "Fetching token list (first access)...");

    let entries = get_api_manager().jupiter.fetch_token_list().await?;
    let list: Arc<Vec<TokenInfo>> = Arc::new(entries.into_iter().map(TokenInfo::from).collect());

    logger::info(
        LogTag::Tokens,
        &format!("✅ Token list cached ({} entries)", list.len()),
    );

    *cached = Some(Arc::clone(&list));
    Ok(list)
}

/// Warm the token list cache in the background at startup
///
/// Failure here is not fatal; the first request that needs the list retries
/// the fetch.
pub fn warm_token_list() {
    tokio::spawn(async {
        if let Err(e) = get_token_list().await {
            logger::warning(
                LogTag::Tokens,
                &format!("Token list warmup failed (will retry on demand): {}", e),
            );
        }
    });
}

/// Resolve a token symbol to its list entry, case-insensitively
pub async fn resolve_symbol(symbol: &str) -> Result<Option<TokenInfo>, ApiError> {
    let list = get_token_list().await?;
    Ok(find_by_symbol(&list, symbol).cloned())
}

/// Search the cached list: exact symbol matches first, then name substrings
pub async fn search_token_list(query: &str, limit: usize) -> Result<Vec<TokenInfo>, ApiError> {
    let list = get_token_list().await?;
    Ok(search_tokens(&list, query, limit))
}

// ============================================================================
// PURE SEARCH HELPERS
// ============================================================================

/// A query shaped like a base58 address is treated as a mint, not a symbol
pub fn looks_like_mint(query: &str) -> bool {
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&query.len())
        && query.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Linear search for an exact symbol match
pub fn find_by_symbol<'a>(list: &'a [TokenInfo], symbol: &str) -> Option<&'a TokenInfo> {
    list.iter().find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}

/// Bounded search: exact symbol matches sort before name-substring matches
pub fn search_tokens(list: &[TokenInfo], query: &str, limit: usize) -> Vec<TokenInfo> {
    let query_lower = query.to_lowercase();
    let mut results: Vec<TokenInfo> = Vec::new();

    for token in list {
        if token.symbol.eq_ignore_ascii_case(query) {
            results.push(token.clone());
            if results.len() >= limit {
                return results;
            }
        }
    }

    for token in list {
        if results.len() >= limit {
            break;
        }
        if token.symbol.eq_ignore_ascii_case(query) {
            continue; // already included above
        }
        if token.name.to_lowercase().contains(&query_lower) {
            results.push(token.clone());
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> Vec<TokenInfo> {
        vec![
            TokenInfo {
                mint: "So11111111111111111111111111111111111111112".to_string(),
                symbol: "SOL".to_string(),
                name: "Wrapped SOL".to_string(),
                decimals: 9,
                logo_uri: None,
            },
            TokenInfo {
                mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
                symbol: "USDC".to_string(),
                name: "USD Coin".to_string(),
                decimals: 6,
                logo_uri: None,
            },
            TokenInfo {
                mint: "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB".to_string(),
                symbol: "USDT".to_string(),
                name: "USDT".to_string(),
                decimals: 6,
                logo_uri: None,
            },
            TokenInfo {
                mint: "SoLid11111111111111111111111111111111111111".to_string(),
                symbol: "SOLID".to_string(),
                name: "Solid Protocol SOL Staking".to_string(),
                decimals: 9,
                logo_uri: None,
            },
        ]
    }

    #[test]
    fn test_find_by_symbol_case_insensitive() {
        let list = sample_list();
        assert_eq!(find_by_symbol(&list, "usdc").unwrap().symbol, "USDC");
        assert_eq!(find_by_symbol(&list, "SOL").unwrap().name, "Wrapped SOL");
        assert!(find_by_symbol(&list, "BONK").is_none());
    }

    #[test]
    fn test_exact_symbol_beats_name_substring() {
        let list = sample_list();
        // "SOL" appears in several names, but the exact symbol match must
        // come first
        let results = search_tokens(&list, "sol", 10);
        assert_eq!(results[0].symbol, "SOL");
        assert!(results.len() > 1);
    }

    #[test]
    fn test_search_limit() {
        let list = sample_list();
        let results = search_tokens(&list, "sol", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "SOL");
    }

    #[test]
    fn test_search_no_duplicates() {
        let list = sample_list();
        // USDT matches both by symbol and by name substring; it must appear once
        let results = search_tokens(&list, "USDT", 10);
        assert_eq!(results.iter().filter(|t| t.symbol == "USDT").count(), 1);
    }

    #[test]
    fn test_looks_like_mint() {
        assert!(looks_like_mint(
            "So11111111111111111111111111111111111111112"
        ));
        assert!(!looks_like_mint("SOL"));
        assert!(!looks_like_mint(&"x".repeat(45)));
        assert!(!looks_like_mint(
            "So1111111111111111111111111111111111111111!"
        ));
    }
}
