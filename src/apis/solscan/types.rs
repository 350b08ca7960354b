/// Solscan API response types
use serde::{Deserialize, Serialize};

/// Response from /token/meta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolscanTokenMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub icon: Option<String>,
}
