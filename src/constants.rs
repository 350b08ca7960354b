/// Global constants used across solgate
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules.

// ============================================================================
// SOLANA BLOCKCHAIN CONSTANTS
// ============================================================================

/// SOL token mint address (wrapped SOL / WSOL)
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Number of decimal places for SOL token
pub const SOL_DECIMALS: u8 = 9;

/// Lamports per SOL (10^9)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Native SOL representation (system program ID placeholder)
pub const NATIVE_SOL_MINT: &str = "11111111111111111111111111111111";

/// SPL token program ID, used as the getTokenAccountsByOwner filter
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Common stablecoin mints
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";

// ============================================================================
// INPUT VALIDATION
// ============================================================================

/// Shortest base58 form a Solana address can take
pub const MIN_ADDRESS_LEN: usize = 32;

/// Longest base58 form a Solana address can take
pub const MAX_ADDRESS_LEN: usize = 44;

/// Fallback decimal count when no source can resolve a mint's decimals
pub const DEFAULT_TOKEN_DECIMALS: u8 = 9;
