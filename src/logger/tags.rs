/// Log tags identifying the subsystem a message came from
///
/// Each tag maps to a --debug-<key> command-line flag via `to_debug_key()`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTag {
    System,
    Server,
    Api,
    Rpc,
    Wallet,
    Prices,
    Tokens,
    Decimals,
    Swap,
    Test,
    Other(String),
}

impl LogTag {
    /// Uncolored tag label for file output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Server => "SERVER".to_string(),
            LogTag::Api => "API".to_string(),
            LogTag::Rpc => "RPC".to_string(),
            LogTag::Wallet => "WALLET".to_string(),
            LogTag::Prices => "PRICES".to_string(),
            LogTag::Tokens => "TOKENS".to_string(),
            LogTag::Decimals => "DECIMALS".to_string(),
            LogTag::Swap => "SWAP".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }

    /// The <key> part of the matching --debug-<key> flag
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Server => "server".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Wallet => "wallet".to_string(),
            LogTag::Prices => "prices".to_string(),
            LogTag::Tokens => "tokens".to_string(),
            LogTag::Decimals => "decimals".to_string(),
            LogTag::Swap => "swaps".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys_match_flags() {
        assert_eq!(LogTag::Api.to_debug_key(), "api");
        assert_eq!(LogTag::Swap.to_debug_key(), "swaps");
        assert_eq!(LogTag::Other("Custom".to_string()).to_debug_key(), "custom");
    }

    #[test]
    fn test_plain_strings() {
        assert_eq!(LogTag::Server.to_plain_string(), "SERVER");
        assert_eq!(LogTag::Other("webhook".to_string()).to_plain_string(), "WEBHOOK");
    }
}
