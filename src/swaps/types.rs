/// Swap quote response types
///
/// Field names are camelCase via explicit serde renames to mirror the quote
/// API the endpoint proxies.
use serde::{Deserialize, Serialize};

use crate::apis::jupiter::types::JupiterQuote;

/// Swap quote returned by GET /swap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "otherAmountThreshold")]
    pub other_amount_threshold: String,
    #[serde(rename = "slippageBps")]
    pub slippage_bps: u16,
    #[serde(rename = "priceImpactPct")]
    pub price_impact_pct: String,
    #[serde(rename = "routePlan")]
    pub route_plan: Vec<QuoteRouteStep>,
    /// "jupiter" for the proxied quote, "simulation" for the local fallback
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRouteStep {
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
    #[serde(default)]
    pub percent: Option<u8>,
}

impl SwapQuote {
    /// Reshape an upstream quote into the response DTO
    pub fn from_jupiter(quote: JupiterQuote, slippage_bps: u16) -> Self {
        let route_plan = quote
            .route_plan
            .into_iter()
            .map(|step| QuoteRouteStep {
                label: step.swap_info.label,
                input_mint: step.swap_info.input_mint,
                output_mint: step.swap_info.output_mint,
                in_amount: step.swap_info.in_amount,
                out_amount: step.swap_info.out_amount,
                percent: step.percent,
            })
            .collect();

        Self {
            input_mint: quote.input_mint,
            in_amount: quote.in_amount,
            output_mint: quote.output_mint,
            out_amount: quote.out_amount.clone(),
            other_amount_threshold: quote.other_amount_threshold.unwrap_or(quote.out_amount),
            slippage_bps: quote.slippage_bps.unwrap_or(slippage_bps),
            price_impact_pct: quote.price_impact_pct.unwrap_or_else(|| "0".to_string()),
            route_plan,
            source: "jupiter".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let quote = SwapQuote {
            input_mint: "in".to_string(),
            in_amount: "100".to_string(),
            output_mint: "out".to_string(),
            out_amount: "99".to_string(),
            other_amount_threshold: "98".to_string(),
            slippage_bps: 50,
            price_impact_pct: "0".to_string(),
            route_plan: vec![],
            source: "simulation".to_string(),
        };

        let encoded = serde_json::to_value(&quote).unwrap();
        assert!(encoded.get("inputMint").is_some());
        assert!(encoded.get("outAmount").is_some());
        assert!(encoded.get("otherAmountThreshold").is_some());
        assert!(encoded.get("slippageBps").is_some());
        assert!(encoded.get("input_mint").is_none());
    }

    #[test]
    fn test_from_jupiter_falls_back_to_out_amount() {
        let upstream: JupiterQuote = serde_json::from_str(
            r#"{
                "inputMint": "a",
                "inAmount": "10",
                "outputMint": "b",
                "outAmount": "9"
            }"#,
        )
        .unwrap();

        let quote = SwapQuote::from_jupiter(upstream, 50);
        assert_eq!(quote.other_amount_threshold, "9");
        assert_eq!(quote.slippage_bps, 50);
        assert_eq!(quote.source, "jupiter");
    }
}
