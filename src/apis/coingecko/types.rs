/// CoinGecko API response types
use serde::Deserialize;
use std::collections::HashMap;

/// Response from /simple/token_price/solana and /simple/price
///
/// Keys are contract addresses (or coin ids) and CoinGecko re-cases them,
/// so lookups match case-insensitively.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPriceResponse(pub HashMap<String, PriceCurrencies>);

#[derive(Debug, Clone, Deserialize)]
pub struct PriceCurrencies {
    #[serde(default)]
    pub usd: Option<f64>,
}

impl TokenPriceResponse {
    /// Case-insensitive USD price lookup
    pub fn usd_price_for(&self, key: &str) -> Option<f64> {
        if let Some(entry) = self.0.get(key) {
            return entry.usd;
        }

        let lowered = key.to_lowercase();
        self.0
            .iter()
            .find(|(k, _)| k.to_lowercase() == lowered)
            .and_then(|(_, entry)| entry.usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_key_lookup() {
        let body = r#"{"solana": {"usd": 152.4}}"#;
        let parsed: TokenPriceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.usd_price_for("solana"), Some(152.4));
    }

    #[test]
    fn test_recased_contract_address() {
        // CoinGecko lowercases contract-address keys in the response
        let body = r#"{"epjfwdd5aufqssqem2qn1xzybapc8g4weggkzwytdt1v": {"usd": 0.9998}}"#;
        let parsed: TokenPriceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.usd_price_for("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            Some(0.9998)
        );
    }

    #[test]
    fn test_missing_entry() {
        let parsed: TokenPriceResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.usd_price_for("anything"), None);
    }
}
