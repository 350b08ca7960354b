/// Birdeye API response types
use serde::Deserialize;

/// Response envelope from /public/price
#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyePriceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<BirdeyePriceData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyePriceData {
    /// USD price
    pub value: f64,
    #[serde(rename = "updateUnixTime", default)]
    pub update_unix_time: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_response() {
        let body = r#"{
            "success": true,
            "data": {"value": 1.0004, "updateUnixTime": 1724900000}
        }"#;

        let parsed: BirdeyePriceResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.unwrap().value, 1.0004);
    }

    #[test]
    fn test_parse_unknown_mint() {
        let parsed: BirdeyePriceResponse =
            serde_json::from_str(r#"{"success": false, "data": null}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
    }
}
