/// Solana JSON-RPC helpers and unit conversions
///
/// Used as the fallback path for /wallet when Helius is disabled or failing,
/// and as the last-resort source for token decimals. Every call walks the
/// configured URL plus its fallbacks; an HTTP 429 from one URL advances to
/// the next, any other transport failure does the same, and a JSON-RPC
/// `error` object is surfaced as an error without advancing.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::arguments::is_debug_rpc_enabled;
use crate::config::get_config;
use crate::constants::{LAMPORTS_PER_SOL, TOKEN_PROGRAM_ID};
use crate::logger::{self, LogTag};

/// Request timeout for RPC calls
const TIMEOUT_SECS: u64 = 15;

// ============================================================================
// UNIT CONVERSIONS
// ============================================================================

/// Convert lamports to SOL (1 SOL = 1_000_000_000 lamports)
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Convert SOL to lamports
pub fn sol_to_lamports(sol_amount: f64) -> u64 {
    (sol_amount * LAMPORTS_PER_SOL as f64) as u64
}

/// Scale a raw integer amount by its decimal count
pub fn raw_to_ui_amount(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Scale a ui amount back to a raw integer amount
pub fn ui_to_raw_amount(ui_amount: f64, decimals: u8) -> u64 {
    (ui_amount * 10f64.powi(decimals as i32)).round() as u64
}

/// Format a raw integer amount as an exact decimal string
///
/// Works on the digit string directly so amounts beyond f64 precision stay
/// exact. Trailing fractional zeros are trimmed.
pub fn format_raw_amount(raw: u64, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };

    let split = padded.len() - decimals;
    let whole = &padded[..split];
    let frac = padded[split..].trim_end_matches('0');

    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}

// ============================================================================
// RPC TYPES
// ============================================================================

/// One SPL token account balance from getTokenAccountsByOwner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAccountBalance {
    pub mint: String,
    /// Raw integer amount as returned by the RPC (string, unscaled)
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: Option<f64>,
    pub token_account: Option<String>,
}

// ============================================================================
// RPC CALLS
// ============================================================================

/// What to do with one endpoint's answer
#[derive(Debug)]
enum RpcDisposition {
    /// The call succeeded; use this result
    Done(Value),
    /// Transient endpoint trouble; record it and try the next URL
    TryNext(String),
    /// A JSON-RPC `error` object: the node understood the request and
    /// rejected it, so retrying elsewhere would not help
    Fail(String),
}

/// Classify a response: 429 and other non-2xx statuses advance to the next
/// URL, as does an undecodable or result-less body; a JSON-RPC `error`
/// object is terminal.
fn classify_rpc_response(
    method: &str,
    url: &str,
    status: u16,
    body: Result<Value, String>,
) -> RpcDisposition {
    if status == 429 {
        return RpcDisposition::TryNext(format!("{}: HTTP 429", url));
    }
    if !(200..300).contains(&status) {
        return RpcDisposition::TryNext(format!("{}: HTTP {}", url, status));
    }

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            return RpcDisposition::TryNext(format!("{}: undecodable body: {}", url, e));
        }
    };

    if let Some(error) = body.get("error") {
        return RpcDisposition::Fail(format!("RPC error from {}: {}", method, error));
    }

    match body.get("result") {
        Some(result) => RpcDisposition::Done(result.clone()),
        None => RpcDisposition::TryNext(format!("{}: response missing result", url)),
    }
}

/// Issue one JSON-RPC call, walking the configured URL list
async fn rpc_call(method: &str, params: Value) -> Result<Value, String> {
    let cfg = get_config();
    let mut urls = vec![cfg.rpc.url.clone()];
    urls.extend(cfg.rpc.fallbacks.clone());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| format!("Failed to create RPC client: {}", e))?;

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let mut last_error = String::new();

    for url in &urls {
        if is_debug_rpc_enabled() {
            logger::debug(LogTag::Rpc, &format!("{} via {}", method, url));
        }

        let response = match client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                last_error = format!("{}: {}", url, e);
                logger::warning(
                    LogTag::Rpc,
                    &format!("RPC {} failed on {}: {}", method, url, e),
                );
                continue;
            }
        };

        let status = response.status().as_u16();
        let body = if (200..300).contains(&status) {
            response.json::<Value>().await.map_err(|e| e.to_string())
        } else {
            Err(String::new())
        };

        match classify_rpc_response(method, url, status, body) {
            RpcDisposition::Done(result) => return Ok(result),
            RpcDisposition::Fail(message) => return Err(message),
            RpcDisposition::TryNext(message) => {
                logger::warning(
                    LogTag::Rpc,
                    &format!("RPC {} trying next URL: {}", method, message),
                );
                last_error = message;
            }
        }
    }

    Err(format!(
        "RPC {} failed on all {} endpoints: {}",
        method,
        urls.len(),
        last_error
    ))
}

/// Get the native balance for a wallet address, in lamports
pub async fn get_balance(address: &str) -> Result<u64, String> {
    let result = rpc_call("getBalance", json!([address])).await?;

    result
        .get("value")
        .and_then(Value::as_u64)
        .ok_or_else(|| "getBalance response missing value".to_string())
}

/// Get all SPL token account balances owned by an address
pub async fn get_token_accounts(owner: &str) -> Result<Vec<TokenAccountBalance>, String> {
    let result = rpc_call(
        "getTokenAccountsByOwner",
        json!([
            owner,
            { "programId": TOKEN_PROGRAM_ID },
            { "encoding": "jsonParsed", "commitment": "confirmed" }
        ]),
    )
    .await?;

    let accounts = result
        .get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| "getTokenAccountsByOwner response missing value array".to_string())?;

    Ok(parse_token_accounts(accounts))
}

/// Extract per-account balances from a jsonParsed account list
fn parse_token_accounts(accounts: &[Value]) -> Vec<TokenAccountBalance> {
    let mut balances = Vec::new();

    for account in accounts {
        let token_account = account
            .get("pubkey")
            .and_then(Value::as_str)
            .map(String::from);

        let info = match account.pointer("/account/data/parsed/info") {
            Some(info) => info,
            None => continue,
        };

        let mint = match info.get("mint").and_then(Value::as_str) {
            Some(mint) => mint.to_string(),
            None => continue,
        };

        let token_amount = match info.get("tokenAmount") {
            Some(token_amount) => token_amount,
            None => continue,
        };

        let amount = token_amount
            .get("amount")
            .and_then(Value::as_str)
            .unwrap_or("0")
            .to_string();
        let decimals = token_amount
            .get("decimals")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u8;
        let ui_amount = token_amount.get("uiAmount").and_then(Value::as_f64);

        balances.push(TokenAccountBalance {
            mint,
            amount,
            decimals,
            ui_amount,
            token_account,
        });
    }

    balances
}

/// Get a mint's decimal count via getTokenSupply
pub async fn get_token_supply_decimals(mint: &str) -> Result<u8, String> {
    let result = rpc_call("getTokenSupply", json!([mint])).await?;

    result
        .pointer("/value/decimals")
        .and_then(Value::as_u64)
        .map(|d| d as u8)
        .ok_or_else(|| "getTokenSupply response missing decimals".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(1_000_000_000), 1.0);
        assert_eq!(lamports_to_sol(1_500_000_000), 1.5);
        assert_eq!(lamports_to_sol(0), 0.0);
        assert_eq!(lamports_to_sol(1), 0.000000001);
    }

    #[test]
    fn test_sol_to_lamports() {
        assert_eq!(sol_to_lamports(1.0), 1_000_000_000);
        assert_eq!(sol_to_lamports(0.5), 500_000_000);
    }

    #[test]
    fn test_raw_to_ui_amount() {
        assert_eq!(raw_to_ui_amount(12_345_678, 6), 12.345678);
        assert_eq!(raw_to_ui_amount(1, 9), 0.000000001);
        assert_eq!(raw_to_ui_amount(42, 0), 42.0);
    }

    #[test]
    fn test_ui_to_raw_amount() {
        assert_eq!(ui_to_raw_amount(12.345678, 6), 12_345_678);
        assert_eq!(ui_to_raw_amount(1.0, 9), 1_000_000_000);
    }

    #[test]
    fn test_format_raw_amount() {
        assert_eq!(format_raw_amount(12_345_678, 6), "12.345678");
        assert_eq!(format_raw_amount(1_000_000_000, 9), "1");
        assert_eq!(format_raw_amount(1, 9), "0.000000001");
        assert_eq!(format_raw_amount(1_500_000_000, 9), "1.5");
        assert_eq!(format_raw_amount(42, 0), "42");
        assert_eq!(format_raw_amount(0, 6), "0");
        // Beyond f64 precision: every digit must survive
        assert_eq!(
            format_raw_amount(18_446_744_073_709_551_615, 6),
            "18446744073709.551615"
        );
    }

    #[test]
    fn test_classify_rate_limit_advances() {
        let outcome = classify_rpc_response("getBalance", "https://a", 429, Err(String::new()));
        match outcome {
            RpcDisposition::TryNext(msg) => assert!(msg.contains("429")),
            other => panic!("expected TryNext, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_server_error_advances() {
        let outcome = classify_rpc_response("getBalance", "https://a", 500, Err(String::new()));
        assert!(matches!(outcome, RpcDisposition::TryNext(_)));
    }

    #[test]
    fn test_classify_rpc_error_is_terminal() {
        // A JSON-RPC error object means the node rejected the request;
        // another URL would answer the same way
        let body = json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32602, "message": "Invalid param"}});
        let outcome = classify_rpc_response("getBalance", "https://a", 200, Ok(body));
        match outcome {
            RpcDisposition::Fail(msg) => assert!(msg.contains("Invalid param")),
            other => panic!("expected Fail, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_missing_result_advances() {
        let outcome = classify_rpc_response("getBalance", "https://a", 200, Ok(json!({"id": 1})));
        assert!(matches!(outcome, RpcDisposition::TryNext(_)));

        let undecodable =
            classify_rpc_response("getBalance", "https://a", 200, Err("not json".to_string()));
        assert!(matches!(undecodable, RpcDisposition::TryNext(_)));
    }

    #[test]
    fn test_classify_result_wins() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": {"value": 42}});
        let outcome = classify_rpc_response("getBalance", "https://a", 200, Ok(body));
        match outcome {
            RpcDisposition::Done(result) => assert_eq!(result["value"], 42),
            other => panic!("expected Done, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_token_accounts() {
        let body = json!([
            {
                "pubkey": "AccountPubkey111111111111111111111111111111",
                "account": {
                    "data": {
                        "parsed": {
                            "info": {
                                "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                                "tokenAmount": {
                                    "amount": "12345678",
                                    "decimals": 6,
                                    "uiAmount": 12.345678
                                }
                            }
                        }
                    }
                }
            },
            { "pubkey": "Garbage", "account": {} }
        ]);

        let accounts = parse_token_accounts(body.as_array().unwrap());
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].amount, "12345678");
        assert_eq!(accounts[0].decimals, 6);
        assert_eq!(accounts[0].ui_amount, Some(12.345678));
        assert_eq!(
            accounts[0].token_account.as_deref(),
            Some("AccountPubkey111111111111111111111111111111")
        );
    }
}
