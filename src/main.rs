use solgate::{
    arguments::{patterns, print_debug_info, print_help, validate_host_argument, validate_port_argument},
    logger::{self as logger, LogTag},
    shutdown, tokens, web_server,
};

/// Main entry point for solgate
///
/// Startup order matters: directories before the logger (log files need the
/// logs directory), argument validation before any network work, the signal
/// handler before the server so Ctrl-C is never unhandled.
#[tokio::main]
async fn main() {
    if let Err(e) = solgate::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    // Help and version exit before anything else runs
    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }
    if patterns::is_version_requested() {
        println!("solgate {}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    if let Err(e) = validate_port_argument() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    if let Err(e) = validate_host_argument() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    logger::info(LogTag::System, "🚀 solgate starting up...");
    print_debug_info();

    if let Err(e) = shutdown::install_signal_handler() {
        logger::error(LogTag::System, &format!("❌ {}", e));
        std::process::exit(1);
    }

    // Warm the token list in the background so the first /price or /find
    // request does not pay the download
    tokens::warm_token_list();

    match web_server::start_web_server().await {
        Ok(_) => {
            logger::info(LogTag::System, "✅ solgate stopped");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ solgate failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }

    logger::flush();
}
