/// Wallet balance assembly for GET /wallet/{address}
///
/// Helius is the primary source; when it is disabled or failing the balance
/// is rebuilt from plain JSON-RPC (getBalance + getTokenAccountsByOwner).
/// Either way the response carries the native balance in both lamports and
/// SOL plus every SPL token holding with raw amount, decimals, and the
/// decimal-scaled ui amount.
use serde::{Deserialize, Serialize};

use crate::apis::error::ApiError;
use crate::apis::helius::types::HeliusBalances;
use crate::apis::manager::get_api_manager;
use crate::arguments::is_debug_wallet_enabled;
use crate::logger::{self, LogTag};
use crate::rpc::{self, format_raw_amount, lamports_to_sol, raw_to_ui_amount, TokenAccountBalance};

/// Response body for GET /wallet/{address}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalance {
    pub address: String,
    pub lamports: u64,
    pub sol: f64,
    pub tokens: Vec<TokenBalance>,
    /// "helius" or "rpc"
    pub source: String,
}

/// One SPL token holding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    pub mint: String,
    /// Raw integer amount, unscaled, as a string to preserve precision
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: f64,
    /// Exact decimal string built from the raw amount
    pub ui_amount_string: String,
    pub token_account: Option<String>,
}

/// Why no balance could be produced
#[derive(Debug, Clone)]
pub struct WalletError(pub String);

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fetch the full balance picture for a wallet address
pub async fn get_wallet_balance(address: &str) -> Result<WalletBalance, WalletError> {
    let manager = get_api_manager();

    match manager.helius.fetch_balances(address).await {
        Ok(balances) => {
            if is_debug_wallet_enabled() {
                logger::debug(
                    LogTag::Wallet,
                    &format!(
                        "Helius answered for {}: {} lamports, {} tokens",
                        address,
                        balances.native_balance,
                        balances.tokens.len()
                    ),
                );
            }
            Ok(from_helius(address, balances))
        }
        Err(ApiError::Disabled) => {
            if is_debug_wallet_enabled() {
                logger::debug(LogTag::Wallet, "Helius disabled, using plain RPC");
            }
            from_rpc(address).await
        }
        Err(e) => {
            logger::warning(
                LogTag::Wallet,
                &format!("Helius failed for {} ({}), falling back to RPC", address, e),
            );
            from_rpc(address).await
        }
    }
}

/// Build the response from a Helius balances payload
fn from_helius(address: &str, balances: HeliusBalances) -> WalletBalance {
    let tokens = balances
        .tokens
        .into_iter()
        .map(|t| TokenBalance {
            amount: t.amount.to_string(),
            ui_amount: raw_to_ui_amount(t.amount, t.decimals),
            ui_amount_string: format_raw_amount(t.amount, t.decimals),
            mint: t.mint,
            decimals: t.decimals,
            token_account: t.token_account,
        })
        .collect();

    WalletBalance {
        address: address.to_string(),
        lamports: balances.native_balance,
        sol: lamports_to_sol(balances.native_balance),
        tokens,
        source: "helius".to_string(),
    }
}

/// Rebuild the response from plain JSON-RPC calls
async fn from_rpc(address: &str) -> Result<WalletBalance, WalletError> {
    let lamports = rpc::get_balance(address).await.map_err(WalletError)?;
    let accounts = rpc::get_token_accounts(address).await.map_err(WalletError)?;

    Ok(WalletBalance {
        address: address.to_string(),
        lamports,
        sol: lamports_to_sol(lamports),
        tokens: accounts.into_iter().map(token_from_rpc).collect(),
        source: "rpc".to_string(),
    })
}

fn token_from_rpc(account: TokenAccountBalance) -> TokenBalance {
    let raw = account.amount.parse::<u64>().unwrap_or(0);
    let ui_amount = account
        .ui_amount
        .unwrap_or_else(|| raw_to_ui_amount(raw, account.decimals));

    TokenBalance {
        mint: account.mint,
        amount: account.amount,
        decimals: account.decimals,
        ui_amount,
        ui_amount_string: format_raw_amount(raw, account.decimals),
        token_account: account.token_account,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_helius_scales_amounts() {
        let balances: HeliusBalances = serde_json::from_str(
            r#"{
                "nativeBalance": 1500000000,
                "tokens": [
                    {"mint": "m1", "amount": 12345678, "decimals": 6},
                    {"mint": "m2", "amount": 1, "decimals": 9}
                ]
            }"#,
        )
        .unwrap();

        let wallet = from_helius("addr", balances);
        assert_eq!(wallet.lamports, 1_500_000_000);
        assert_eq!(wallet.sol, 1.5);
        assert_eq!(wallet.source, "helius");

        assert_eq!(wallet.tokens[0].amount, "12345678");
        assert_eq!(wallet.tokens[0].ui_amount, 12.345678);
        assert_eq!(wallet.tokens[0].ui_amount_string, "12.345678");

        assert_eq!(wallet.tokens[1].ui_amount, 0.000000001);
        assert_eq!(wallet.tokens[1].ui_amount_string, "0.000000001");
    }

    #[test]
    fn test_token_from_rpc_prefers_reported_ui_amount() {
        let account = TokenAccountBalance {
            mint: "m1".to_string(),
            amount: "5000000".to_string(),
            decimals: 6,
            ui_amount: Some(5.0),
            token_account: Some("acct".to_string()),
        };

        let token = token_from_rpc(account);
        assert_eq!(token.ui_amount, 5.0);
        assert_eq!(token.ui_amount_string, "5");
    }

    #[test]
    fn test_token_from_rpc_computes_missing_ui_amount() {
        let account = TokenAccountBalance {
            mint: "m1".to_string(),
            amount: "2500000".to_string(),
            decimals: 6,
            ui_amount: None,
            token_account: None,
        };

        let token = token_from_rpc(account);
        assert_eq!(token.ui_amount, 2.5);
        assert_eq!(token.ui_amount_string, "2.5");
    }
}
