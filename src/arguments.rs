/// Centralized argument handling for solgate
///
/// All command-line parsing and debug flag checking lives here so that the
/// logger, the web server, and the vendor clients read flags the same way.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Webserver host/port overrides with validation
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// API calls debug mode
pub fn is_debug_api_enabled() -> bool {
    has_arg("--debug-api")
}

/// RPC operations debug mode
pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

/// Web server debug mode
pub fn is_debug_server_enabled() -> bool {
    has_arg("--debug-server")
}

/// Wallet endpoint debug mode
pub fn is_debug_wallet_enabled() -> bool {
    has_arg("--debug-wallet")
}

/// Price resolution debug mode
pub fn is_debug_prices_enabled() -> bool {
    has_arg("--debug-prices")
}

/// Token list debug mode
pub fn is_debug_tokens_enabled() -> bool {
    has_arg("--debug-tokens")
}

/// Swap quote debug mode
pub fn is_debug_swaps_enabled() -> bool {
    has_arg("--debug-swaps")
}

/// Decimals resolution debug mode
pub fn is_debug_decimals_enabled() -> bool {
    has_arg("--debug-decimals")
}

/// System operations debug mode
pub fn is_debug_system_enabled() -> bool {
    has_arg("--debug-system")
}

// =============================================================================
// WEBSERVER OVERRIDES
// =============================================================================

/// Gets the --port override if provided
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|s| s.parse().ok())
}

/// Gets the --host override if provided
pub fn get_host_override() -> Option<String> {
    get_arg_value("--host")
}

/// Ports below 1024 need elevated privileges on most platforms
pub fn is_privileged_port(port: u16) -> bool {
    port < 1024
}

/// Validates the --port argument when present
/// A flag with a missing or unparsable value is an error, not a silent default
pub fn validate_port_argument() -> Result<(), String> {
    if !has_arg("--port") {
        return Ok(());
    }

    match get_arg_value("--port") {
        Some(raw) => match raw.parse::<u16>() {
            Ok(0) => Err("Port 0 is not a valid listen port".to_string()),
            Ok(_) => Ok(()),
            Err(_) => Err(format!("Invalid port value: {}", raw)),
        },
        None => Err("--port requires a value".to_string()),
    }
}

/// Validates the --host argument when present
pub fn validate_host_argument() -> Result<(), String> {
    if !has_arg("--host") {
        return Ok(());
    }

    match get_arg_value("--host") {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err("--host requires a non-empty value".to_string()),
    }
}

// =============================================================================
// HELP SYSTEM
// =============================================================================

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("solgate - Solana wallet and token data gateway");
    println!();
    println!("USAGE:");
    println!("    solgate [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --host <HOST>             Bind address override (default from config)");
    println!("    --port <PORT>             Listen port override (default from config)");
    println!("    --help, -h                Show this help message");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-api               API calls debug mode");
    println!("    --debug-decimals          Decimals resolution debug mode");
    println!("    --debug-prices            Price resolution debug mode");
    println!("    --debug-rpc               RPC operations debug mode");
    println!("    --debug-server            Web server debug mode");
    println!("    --debug-swaps             Swap quote debug mode");
    println!("    --debug-system            System operations debug mode");
    println!("    --debug-tokens            Token list debug mode");
    println!("    --debug-wallet            Wallet endpoint debug mode");
    println!("    --verbose, -v             Enable verbose logging for all modules");
    println!("    --quiet, -q               Errors only");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /wallet/{{address}}     Wallet SOL and token balances");
    println!("    GET /price/{{identifier}}  USD price for a mint or symbol");
    println!("    GET /swap                 Swap quote (inputMint, outputMint, amount)");
    println!("    GET /find/{{query}}        Token search over the cached token list");
    println!("    GET /health               Liveness probe");
    println!("    GET /stats                Upstream API statistics");
    println!();
    println!("EXAMPLES:");
    println!("    solgate                             # Start with config defaults");
    println!("    solgate --port 9000                 # Start on port 9000");
    println!("    solgate --debug-api --debug-prices  # Debug upstream calls");
}

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

/// Checks if any debug mode is enabled
pub fn is_any_debug_enabled() -> bool {
    is_debug_api_enabled()
        || is_debug_rpc_enabled()
        || is_debug_server_enabled()
        || is_debug_wallet_enabled()
        || is_debug_prices_enabled()
        || is_debug_tokens_enabled()
        || is_debug_swaps_enabled()
        || is_debug_decimals_enabled()
        || is_debug_system_enabled()
}

/// Gets a list of all enabled debug modes
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let mut modes = Vec::new();

    if is_debug_api_enabled() {
        modes.push("api");
    }
    if is_debug_rpc_enabled() {
        modes.push("rpc");
    }
    if is_debug_server_enabled() {
        modes.push("server");
    }
    if is_debug_wallet_enabled() {
        modes.push("wallet");
    }
    if is_debug_prices_enabled() {
        modes.push("prices");
    }
    if is_debug_tokens_enabled() {
        modes.push("tokens");
    }
    if is_debug_swaps_enabled() {
        modes.push("swaps");
    }
    if is_debug_decimals_enabled() {
        modes.push("decimals");
    }
    if is_debug_system_enabled() {
        modes.push("system");
    }

    modes
}

/// Prints debug information about current arguments and enabled debug modes
pub fn print_debug_info() {
    let enabled_modes = get_enabled_debug_modes();
    if !enabled_modes.is_empty() {
        println!("Enabled debug modes: {:?}", enabled_modes);
    }
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

/// Common argument parsing patterns
pub mod patterns {
    use super::*;

    /// Checks for help flags
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    /// Checks for version flags
    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }

    /// Checks for quiet/silent mode
    pub fn is_quiet_mode() -> bool {
        has_arg("--quiet") || has_arg("-q")
    }

    /// Checks for verbose mode
    pub fn is_verbose_mode() -> bool {
        has_arg("--verbose") || has_arg("-v")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CMD_ARGS is process-global; serialize tests that rewrite it
    static TEST_ARGS_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_and_get_args() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        let test_args = vec![
            "solgate".to_string(),
            "--debug-api".to_string(),
            "--port".to_string(),
            "9000".to_string(),
        ];

        set_cmd_args(test_args.clone());
        let retrieved_args = get_cmd_args();

        assert_eq!(retrieved_args, test_args);
    }

    #[test]
    fn test_has_arg() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        set_cmd_args(vec!["solgate".to_string(), "--debug-api".to_string()]);

        assert!(has_arg("--debug-api"));
        assert!(!has_arg("--debug-rpc"));
    }

    #[test]
    fn test_get_arg_value() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        set_cmd_args(vec![
            "solgate".to_string(),
            "--host".to_string(),
            "0.0.0.0".to_string(),
        ]);

        assert_eq!(get_arg_value("--host"), Some("0.0.0.0".to_string()));
        assert_eq!(get_arg_value("--port"), None);
    }

    #[test]
    fn test_debug_flags() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        set_cmd_args(vec![
            "solgate".to_string(),
            "--debug-api".to_string(),
            "--debug-prices".to_string(),
        ]);

        assert!(is_debug_api_enabled());
        assert!(is_debug_prices_enabled());
        assert!(!is_debug_wallet_enabled());
        assert!(is_any_debug_enabled());

        let enabled_modes = get_enabled_debug_modes();
        assert!(enabled_modes.contains(&"api"));
        assert!(enabled_modes.contains(&"prices"));
        assert!(!enabled_modes.contains(&"wallet"));
    }

    #[test]
    fn test_port_override() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        set_cmd_args(vec![
            "solgate".to_string(),
            "--port".to_string(),
            "9000".to_string(),
        ]);

        assert_eq!(get_port_override(), Some(9000));
        assert!(validate_port_argument().is_ok());

        set_cmd_args(vec![
            "solgate".to_string(),
            "--port".to_string(),
            "not-a-port".to_string(),
        ]);

        assert_eq!(get_port_override(), None);
        assert!(validate_port_argument().is_err());
    }

    #[test]
    fn test_host_override() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        set_cmd_args(vec![
            "solgate".to_string(),
            "--host".to_string(),
            "127.0.0.1".to_string(),
        ]);

        assert_eq!(get_host_override(), Some("127.0.0.1".to_string()));
        assert!(validate_host_argument().is_ok());
    }

    #[test]
    fn test_privileged_port() {
        assert!(is_privileged_port(80));
        assert!(is_privileged_port(443));
        assert!(!is_privileged_port(8080));
    }

    #[test]
    fn test_patterns() {
        let _guard = TEST_ARGS_LOCK.lock().unwrap();
        set_cmd_args(vec!["solgate".to_string(), "--help".to_string()]);

        assert!(patterns::is_help_requested());
        assert!(!patterns::is_version_requested());
    }
}
