/// API error types shared by all upstream clients
use serde::{Deserialize, Serialize};

/// API error types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ApiError {
    NetworkError(String),
    RateLimitExceeded,
    InvalidResponse(String),
    NotFound,
    Timeout,
    Disabled,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Timeout => write!(f, "Request timeout"),
            ApiError::Disabled => write!(f, "API disabled"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(err: ApiError) -> String {
        err.to_string()
    }
}

impl ApiError {
    /// Map a reqwest error to the right variant
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(e.to_string())
        }
    }

    /// Map a non-2xx upstream status to the right variant
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status.as_u16() == 429 {
            ApiError::RateLimitExceeded
        } else if status.as_u16() == 404 {
            ApiError::NotFound
        } else {
            ApiError::InvalidResponse(format!("HTTP {}", status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS),
            ApiError::RateLimitExceeded
        ));
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::NOT_FOUND),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::Disabled.to_string(), "API disabled");
        assert_eq!(
            ApiError::NetworkError("refused".to_string()).to_string(),
            "Network error: refused"
        );
    }
}
