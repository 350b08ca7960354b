/// Axum web server exposing the gateway endpoints
///
/// Routes:
/// - GET /wallet/{address}    Native and SPL token balances
/// - GET /price/{identifier}  USD price for a mint or symbol
/// - GET /swap                Swap quote (inputMint, outputMint, amount)
/// - GET /find/{query}        Token search over the cached token list
/// - GET /health              Liveness: status, version, uptime
/// - GET /stats               Per-provider request statistics
///
/// Error bodies are uniformly `{"detail": "<message>"}`: 400 for malformed
/// input, 404 when upstream answers with no data, 502 when the upstream
/// chain is exhausted at the transport level.
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::apis::error::ApiError;
use crate::apis::manager::get_api_manager;
use crate::arguments::{get_host_override, get_port_override, is_debug_server_enabled};
use crate::config::get_config;
use crate::constants::{MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};
use crate::logger::{self, LogTag};
use crate::prices::{self, PriceError};
use crate::shutdown;
use crate::swaps::{self, QuoteError};
use crate::tokens;
use crate::wallet;

/// Bounded result count for /find
const MAX_FIND_RESULTS: usize = 10;

/// Process start, for the /health uptime field
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

// ============================================================================
// ERROR RESPONSE TYPE
// ============================================================================

/// HTTP error carrying status + detail, rendered as `{"detail": ...}`
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub detail: String,
}

impl HttpError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<PriceError> for HttpError {
    fn from(e: PriceError) -> Self {
        match e {
            PriceError::NotFound => HttpError::not_found("No price data for this token"),
            PriceError::Upstream(msg) => HttpError::bad_gateway(msg),
        }
    }
}

impl From<QuoteError> for HttpError {
    fn from(e: QuoteError) -> Self {
        match e {
            QuoteError::NotFound => HttpError::not_found("No quote data for this mint pair"),
            QuoteError::Upstream(msg) => HttpError::bad_gateway(msg),
        }
    }
}

/// Token list / search failures: a disabled source reads as an outage
impl From<ApiError> for HttpError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::NotFound => HttpError::not_found("Not found"),
            other => HttpError::bad_gateway(other.to_string()),
        }
    }
}

// ============================================================================
// INPUT VALIDATION
// ============================================================================

/// The 400 gate: addresses and mints must be 32-44 characters
///
/// Length only - no alphabet check, so nothing the upstreams would accept
/// is ever rejected here.
pub fn validate_address(address: &str) -> Result<(), HttpError> {
    let len = address.len();
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) {
        return Err(HttpError::bad_request(format!(
            "Invalid address length {} (expected {}-{} characters)",
            len, MIN_ADDRESS_LEN, MAX_ADDRESS_LEN
        )));
    }
    Ok(())
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /wallet/{address}
async fn wallet_handler(Path(address): Path<String>) -> Result<Response, HttpError> {
    validate_address(&address)?;

    if is_debug_server_enabled() {
        logger::debug(LogTag::Server, &format!("GET /wallet/{}", address));
    }

    let balance = wallet::get_wallet_balance(&address)
        .await
        .map_err(|e| HttpError::bad_gateway(e.to_string()))?;

    Ok(Json(balance).into_response())
}

/// GET /price/{identifier}
///
/// The identifier is a mint address or a token symbol; symbols resolve
/// through the memoized token list before hitting the provider chain.
async fn price_handler(Path(identifier): Path<String>) -> Result<Response, HttpError> {
    if identifier.is_empty() {
        return Err(HttpError::bad_request("Empty price identifier"));
    }

    if is_debug_server_enabled() {
        logger::debug(LogTag::Server, &format!("GET /price/{}", identifier));
    }

    let mint = if tokens::looks_like_mint(&identifier) {
        identifier.clone()
    } else {
        match tokens::resolve_symbol(&identifier).await? {
            Some(token) => token.mint,
            None => {
                return Err(HttpError::not_found(format!(
                    "Unknown token symbol: {}",
                    identifier
                )))
            }
        }
    };

    let price = prices::get_price_for_mint(&mint).await?;
    Ok(Json(price).into_response())
}

/// Query parameters for GET /swap (camelCase, mirroring the quote API)
#[derive(Debug, Deserialize)]
struct SwapParams {
    #[serde(rename = "inputMint")]
    input_mint: String,
    #[serde(rename = "outputMint")]
    output_mint: String,
    amount: String,
    #[serde(rename = "slippageBps", default)]
    slippage_bps: Option<u16>,
}

/// GET /swap?inputMint=&outputMint=&amount=
async fn swap_handler(Query(params): Query<SwapParams>) -> Result<Response, HttpError> {
    validate_address(&params.input_mint)?;
    validate_address(&params.output_mint)?;

    let amount: u64 = params
        .amount
        .parse()
        .map_err(|_| HttpError::bad_request(format!("Invalid amount: {}", params.amount)))?;
    if amount == 0 {
        return Err(HttpError::bad_request("Amount must be positive"));
    }

    if is_debug_server_enabled() {
        logger::debug(
            LogTag::Server,
            &format!(
                "GET /swap {} -> {} amount={}",
                params.input_mint, params.output_mint, amount
            ),
        );
    }

    let quote = swaps::get_swap_quote(
        &params.input_mint,
        &params.output_mint,
        amount,
        params.slippage_bps,
    )
    .await?;

    Ok(Json(quote).into_response())
}

/// Search result entry for /find when the query is mint-shaped
#[derive(Debug, Serialize)]
struct MintLookupResult {
    mint: String,
    symbol: Option<String>,
    name: Option<String>,
    decimals: Option<u8>,
    logo_uri: Option<String>,
}

/// GET /find/{query}
///
/// Mint-shaped queries go to Solscan token metadata; anything else searches
/// the cached token list (exact symbol first, then name substring).
async fn find_handler(Path(query): Path<String>) -> Result<Response, HttpError> {
    if query.is_empty() {
        return Err(HttpError::bad_request("Empty search query"));
    }

    if is_debug_server_enabled() {
        logger::debug(LogTag::Server, &format!("GET /find/{}", query));
    }

    if tokens::looks_like_mint(&query) {
        let meta = get_api_manager().solscan.fetch_token_meta(&query).await?;
        let result = MintLookupResult {
            mint: query,
            symbol: meta.symbol,
            name: meta.name,
            decimals: meta.decimals,
            logo_uri: meta.icon,
        };
        return Ok(Json(json!({ "results": [result] })).into_response());
    }

    let results = tokens::search_token_list(&query, MAX_FIND_RESULTS).await?;
    if results.is_empty() {
        return Err(HttpError::not_found(format!(
            "No token matching: {}",
            query
        )));
    }

    Ok(Json(json!({ "results": results })).into_response())
}

/// Liveness response for GET /health
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
}

/// GET /health
async fn health_handler() -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: START_TIME.elapsed().as_secs(),
    };
    Json(response).into_response()
}

/// GET /stats
async fn stats_handler() -> Response {
    let stats = get_api_manager().get_all_stats().await;
    Json(stats).into_response()
}

// ============================================================================
// SERVER LIFECYCLE
// ============================================================================

/// Build the router with all routes and middleware
pub fn build_router() -> Router {
    Router::new()
        .route("/wallet/:address", get(wallet_handler))
        .route("/price/:identifier", get(price_handler))
        .route("/swap", get(swap_handler))
        .route("/find/:query", get(find_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
}

/// Start the web server; blocks until shutdown is requested
pub async fn start_web_server() -> Result<(), String> {
    // Pin the start time before the first request can observe uptime
    Lazy::force(&START_TIME);

    let cfg = get_config();
    let host = get_host_override().unwrap_or(cfg.server.host);
    let port = get_port_override().unwrap_or(cfg.server.port);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address {}:{}: {}", host, port, e))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!("Failed to bind to {}: address already in use", addr)
            }
            std::io::ErrorKind::PermissionDenied => format!(
                "Failed to bind to {}: permission denied (ports below 1024 need privileges)",
                addr
            ),
            _ => format!("Failed to bind to {}: {}", addr, e),
        })?;

    logger::info(
        LogTag::Server,
        &format!("🌐 Listening on http://{}", addr),
    );

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown::wait_for_shutdown())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Server, "✅ Web server stopped gracefully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address_length_gate() {
        // 32 and 44 are inclusive bounds
        assert!(validate_address(&"a".repeat(32)).is_ok());
        assert!(validate_address(&"a".repeat(44)).is_ok());
        assert!(validate_address("So11111111111111111111111111111111111111112").is_ok());

        assert!(validate_address(&"a".repeat(31)).is_err());
        assert!(validate_address(&"a".repeat(45)).is_err());
        assert!(validate_address("").is_err());
    }

    #[test]
    fn test_validation_error_is_400() {
        let err = validate_address("short").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_price_error_mapping() {
        let err: HttpError = PriceError::NotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: HttpError = PriceError::Upstream("all down".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_quote_error_mapping() {
        let err: HttpError = QuoteError::NotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: HttpError = QuoteError::Upstream("down".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_api_error_mapping() {
        let err: HttpError = ApiError::NotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: HttpError = ApiError::Disabled.into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);

        let err: HttpError = ApiError::Timeout.into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = HttpError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "detail": "nope" }));
    }

    #[test]
    fn test_swap_params_camel_case() {
        let params: SwapParams = serde_json::from_str(
            r#"{
                "inputMint": "So11111111111111111111111111111111111111112",
                "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "amount": "1000000000",
                "slippageBps": 75
            }"#,
        )
        .unwrap();

        assert_eq!(params.amount, "1000000000");
        assert_eq!(params.slippage_bps, Some(75));
    }
}
