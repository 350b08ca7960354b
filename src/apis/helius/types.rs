/// Helius API response types
use serde::{Deserialize, Deserializer, Serialize};

/// Response from /v0/addresses/{address}/balances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeliusBalances {
    /// Native balance in lamports
    #[serde(rename = "nativeBalance", default)]
    pub native_balance: u64,
    #[serde(default)]
    pub tokens: Vec<HeliusTokenBalance>,
}

/// One SPL token holding within a balances response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeliusTokenBalance {
    pub mint: String,
    /// Raw integer amount, unscaled. Helius has shipped this both as a JSON
    /// number and as a digit string, so accept either.
    #[serde(default, deserialize_with = "amount_from_number_or_string")]
    pub amount: u64,
    #[serde(default)]
    pub decimals: u8,
    #[serde(rename = "tokenAccount", default)]
    pub token_account: Option<String>,
}

fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_balances_response() {
        let body = r#"{
            "nativeBalance": 1500000000,
            "tokens": [
                {
                    "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "amount": 12345678,
                    "decimals": 6,
                    "tokenAccount": "9yiZThTzanryu3mg1VVu6Qy4HiqKhydCAUqcasLHPxWB"
                }
            ]
        }"#;

        let parsed: HeliusBalances = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.native_balance, 1_500_000_000);
        assert_eq!(parsed.tokens.len(), 1);
        assert_eq!(parsed.tokens[0].amount, 12_345_678);
        assert_eq!(parsed.tokens[0].decimals, 6);
        assert_eq!(
            parsed.tokens[0].token_account.as_deref(),
            Some("9yiZThTzanryu3mg1VVu6Qy4HiqKhydCAUqcasLHPxWB")
        );
    }

    #[test]
    fn test_parse_string_amounts() {
        let body = r#"{
            "nativeBalance": 1500000000,
            "tokens": [
                {"mint": "m1", "amount": "100000000", "decimals": 6},
                {"mint": "m2", "amount": 42, "decimals": 9}
            ]
        }"#;

        let parsed: HeliusBalances = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.tokens[0].amount, 100_000_000);
        assert_eq!(parsed.tokens[1].amount, 42);
    }

    #[test]
    fn test_reject_non_numeric_string_amount() {
        let body = r#"{"nativeBalance": 0, "tokens": [{"mint": "m1", "amount": "lots"}]}"#;
        assert!(serde_json::from_str::<HeliusBalances>(body).is_err());
    }

    #[test]
    fn test_parse_empty_wallet() {
        let parsed: HeliusBalances = serde_json::from_str(r#"{"nativeBalance": 0}"#).unwrap();
        assert_eq!(parsed.native_balance, 0);
        assert!(parsed.tokens.is_empty());
    }
}
