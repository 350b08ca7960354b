/// Jupiter API response types
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// PRICE API (/price/v2)
// ============================================================================

/// Response envelope from /price/v2
///
/// The data map keys are the requested mint ids; unknown mints appear with a
/// null value, so entries are doubly optional.
#[derive(Debug, Clone, Deserialize)]
pub struct JupiterPriceResponse {
    #[serde(default)]
    pub data: HashMap<String, Option<JupiterPriceEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JupiterPriceEntry {
    pub id: String,
    #[serde(rename = "type", default)]
    pub price_type: Option<String>,
    /// Price arrives as a decimal string
    pub price: String,
}

impl JupiterPriceResponse {
    /// Extract the parsed USD price for a mint, if the API had one
    pub fn price_for(&self, mint: &str) -> Option<f64> {
        self.data
            .get(mint)
            .and_then(|entry| entry.as_ref())
            .and_then(|entry| entry.price.parse::<f64>().ok())
    }
}

// ============================================================================
// TOKEN LIST (token.jup.ag/strict)
// ============================================================================

/// One entry in the strict token list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenListEntry {
    pub address: String,
    #[serde(rename = "chainId", default)]
    pub chain_id: Option<i64>,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ============================================================================
// QUOTE API (/swap/v1/quote)
// ============================================================================

/// Swap quote as returned by /swap/v1/quote
///
/// Numeric fields arrive as strings; they are passed through untouched so the
/// proxy never loses precision re-encoding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JupiterQuote {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "otherAmountThreshold", default)]
    pub other_amount_threshold: Option<String>,
    #[serde(rename = "swapMode", default)]
    pub swap_mode: Option<String>,
    #[serde(rename = "slippageBps", default)]
    pub slippage_bps: Option<u16>,
    #[serde(rename = "priceImpactPct", default)]
    pub price_impact_pct: Option<String>,
    #[serde(rename = "routePlan", default)]
    pub route_plan: Vec<RoutePlanStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanStep {
    #[serde(rename = "swapInfo")]
    pub swap_info: SwapInfo,
    #[serde(default)]
    pub percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapInfo {
    #[serde(rename = "ammKey", default)]
    pub amm_key: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "feeAmount", default)]
    pub fee_amount: Option<String>,
    #[serde(rename = "feeMint", default)]
    pub fee_mint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_response_with_entry() {
        let body = r#"{
            "data": {
                "So11111111111111111111111111111111111111112": {
                    "id": "So11111111111111111111111111111111111111112",
                    "type": "derivedPrice",
                    "price": "152.37"
                }
            }
        }"#;

        let parsed: JupiterPriceResponse = serde_json::from_str(body).unwrap();
        let price = parsed.price_for("So11111111111111111111111111111111111111112");
        assert_eq!(price, Some(152.37));
    }

    #[test]
    fn test_price_response_null_entry_is_not_found() {
        let body = r#"{"data": {"BadMint1111111111111111111111111111111111": null}}"#;
        let parsed: JupiterPriceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.price_for("BadMint1111111111111111111111111111111111"),
            None
        );
        assert_eq!(parsed.price_for("missing"), None);
    }

    #[test]
    fn test_parse_token_list_entry() {
        let body = r#"[{
            "address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "chainId": 101,
            "decimals": 6,
            "name": "USD Coin",
            "symbol": "USDC",
            "logoURI": "https://example.com/usdc.png",
            "tags": ["stablecoin"]
        }]"#;

        let parsed: Vec<TokenListEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed[0].symbol, "USDC");
        assert_eq!(parsed[0].decimals, 6);
        assert_eq!(parsed[0].tags, vec!["stablecoin"]);
    }

    #[test]
    fn test_parse_quote_with_string_amounts() {
        let body = r#"{
            "inputMint": "So11111111111111111111111111111111111111112",
            "inAmount": "1000000000",
            "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "outAmount": "152370000",
            "otherAmountThreshold": "151608150",
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "priceImpactPct": "0.0001",
            "routePlan": [{
                "swapInfo": {
                    "ammKey": "AmmKey111",
                    "label": "Orca",
                    "inputMint": "So11111111111111111111111111111111111111112",
                    "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "inAmount": "1000000000",
                    "outAmount": "152370000",
                    "feeAmount": "300000",
                    "feeMint": "So11111111111111111111111111111111111111112"
                },
                "percent": 100
            }]
        }"#;

        let quote: JupiterQuote = serde_json::from_str(body).unwrap();
        assert_eq!(quote.out_amount, "152370000");
        assert_eq!(quote.slippage_bps, Some(50));
        assert_eq!(quote.route_plan.len(), 1);
        assert_eq!(quote.route_plan[0].swap_info.label.as_deref(), Some("Orca"));

        // Round-trips back to camelCase for the response body
        let encoded = serde_json::to_value(&quote).unwrap();
        assert!(encoded.get("outAmount").is_some());
        assert!(encoded.get("routePlan").is_some());
    }
}
