/// Swap quote resolution
///
/// Primary path is a direct proxy to the Jupiter quote API. When the proxy
/// fails, a local simulation computes `amount × price(in) ÷ price(out)` less
/// a configured haircut, routed [input, USDC, output]. The endpoint quotes
/// only - no transaction is ever built or signed.

pub mod types;

pub use types::{QuoteRouteStep, SwapQuote};

use crate::apis::manager::get_api_manager;
use crate::arguments::is_debug_swaps_enabled;
use crate::config::get_config;
use crate::constants::USDC_MINT;
use crate::logger::{self, LogTag};
use crate::prices::{self, PriceError};
use crate::tokens::decimals::get_token_decimals;

/// Why no quote could be produced
#[derive(Debug, Clone)]
pub enum QuoteError {
    /// No price data exists for one of the mints, so even the simulation
    /// has nothing to work with
    NotFound,
    /// The quote API and the simulation's price sources all failed upstream
    Upstream(String),
}

impl std::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteError::NotFound => write!(f, "No quote data for mint pair"),
            QuoteError::Upstream(msg) => write!(f, "Quote sources failed: {}", msg),
        }
    }
}

/// Get a swap quote: proxy first, simulation fallback
pub async fn get_swap_quote(
    input_mint: &str,
    output_mint: &str,
    amount: u64,
    slippage_bps: Option<u16>,
) -> Result<SwapQuote, QuoteError> {
    let cfg = get_config();
    let slippage_bps = slippage_bps.unwrap_or(cfg.swap.slippage_bps);

    match get_api_manager()
        .jupiter
        .fetch_quote(input_mint, output_mint, amount, slippage_bps)
        .await
    {
        Ok(quote) => {
            if is_debug_swaps_enabled() {
                logger::debug(
                    LogTag::Swap,
                    &format!(
                        "Quote API answered: {} {} -> {} {}",
                        quote.in_amount, input_mint, quote.out_amount, output_mint
                    ),
                );
            }
            Ok(SwapQuote::from_jupiter(quote, slippage_bps))
        }
        Err(e) => {
            logger::warning(
                LogTag::Swap,
                &format!("Quote API unavailable ({}), simulating locally", e),
            );
            simulate_quote(input_mint, output_mint, amount, slippage_bps).await
        }
    }
}

/// Price-ratio simulation used when the quote API is unreachable
async fn simulate_quote(
    input_mint: &str,
    output_mint: &str,
    amount: u64,
    slippage_bps: u16,
) -> Result<SwapQuote, QuoteError> {
    let cfg = get_config();

    let input_price = prices::get_price_for_mint(input_mint)
        .await
        .map_err(map_price_error)?;
    let output_price = prices::get_price_for_mint(output_mint)
        .await
        .map_err(map_price_error)?;

    if output_price.price_usd <= 0.0 {
        return Err(QuoteError::NotFound);
    }

    let input_decimals = get_token_decimals(input_mint).await;
    let output_decimals = get_token_decimals(output_mint).await;

    let out_amount = simulate_out_amount(
        amount,
        input_decimals,
        output_decimals,
        input_price.price_usd,
        output_price.price_usd,
        cfg.swap.simulation_fee_bps,
    );
    let threshold = apply_bps_haircut(out_amount, slippage_bps);

    if is_debug_swaps_enabled() {
        logger::debug(
            LogTag::Swap,
            &format!(
                "Simulated {} {} -> {} {} (in ${}, out ${})",
                amount,
                input_mint,
                out_amount,
                output_mint,
                input_price.price_usd,
                output_price.price_usd
            ),
        );
    }

    // Two-hop route through USDC, mirroring how an aggregator would bridge
    let route_plan = vec![
        QuoteRouteStep {
            label: Some("Simulated".to_string()),
            input_mint: input_mint.to_string(),
            output_mint: USDC_MINT.to_string(),
            in_amount: amount.to_string(),
            out_amount: String::new(),
            percent: Some(100),
        },
        QuoteRouteStep {
            label: Some("Simulated".to_string()),
            input_mint: USDC_MINT.to_string(),
            output_mint: output_mint.to_string(),
            in_amount: String::new(),
            out_amount: out_amount.to_string(),
            percent: Some(100),
        },
    ];

    Ok(SwapQuote {
        input_mint: input_mint.to_string(),
        in_amount: amount.to_string(),
        output_mint: output_mint.to_string(),
        out_amount: out_amount.to_string(),
        other_amount_threshold: threshold.to_string(),
        slippage_bps,
        price_impact_pct: "0".to_string(),
        route_plan,
        source: "simulation".to_string(),
    })
}

fn map_price_error(e: PriceError) -> QuoteError {
    match e {
        PriceError::NotFound => QuoteError::NotFound,
        PriceError::Upstream(msg) => QuoteError::Upstream(msg),
    }
}

// ============================================================================
// PURE SIMULATION ARITHMETIC
// ============================================================================

/// `amount × price(in) ÷ price(out)`, rescaled between decimal bases, less
/// the haircut
pub fn simulate_out_amount(
    amount: u64,
    input_decimals: u8,
    output_decimals: u8,
    input_price_usd: f64,
    output_price_usd: f64,
    fee_bps: u16,
) -> u64 {
    let input_ui = amount as f64 / 10f64.powi(input_decimals as i32);
    let output_ui = input_ui * input_price_usd / output_price_usd;
    let after_fee = output_ui * (1.0 - fee_bps as f64 / 10_000.0);

    (after_fee * 10f64.powi(output_decimals as i32)).round() as u64
}

/// Reduce an amount by a basis-point fraction (slippage floor)
pub fn apply_bps_haircut(amount: u64, bps: u16) -> u64 {
    (amount as f64 * (1.0 - bps as f64 / 10_000.0)).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_same_decimals_equal_prices() {
        // 1:1 price ratio, 0.5% haircut: 1_000_000 -> 995_000
        let out = simulate_out_amount(1_000_000, 6, 6, 1.0, 1.0, 50);
        assert_eq!(out, 995_000);
    }

    #[test]
    fn test_simulate_price_ratio() {
        // 1 SOL at $150 into a $1 stable with 6 decimals, no fee
        let out = simulate_out_amount(1_000_000_000, 9, 6, 150.0, 1.0, 0);
        assert_eq!(out, 150_000_000);
    }

    #[test]
    fn test_simulate_decimal_rescaling() {
        // Same USD value, only the decimal base changes
        let out = simulate_out_amount(1_000_000, 6, 9, 2.0, 2.0, 0);
        assert_eq!(out, 1_000_000_000);
    }

    #[test]
    fn test_simulate_haircut_half_percent() {
        let no_fee = simulate_out_amount(1_000_000_000, 9, 6, 150.0, 1.0, 0);
        let with_fee = simulate_out_amount(1_000_000_000, 9, 6, 150.0, 1.0, 50);
        assert_eq!(with_fee, (no_fee as f64 * 0.995).round() as u64);
    }

    #[test]
    fn test_apply_bps_haircut() {
        assert_eq!(apply_bps_haircut(10_000, 50), 9_950);
        assert_eq!(apply_bps_haircut(10_000, 0), 10_000);
        assert_eq!(apply_bps_haircut(0, 50), 0);
    }
}
