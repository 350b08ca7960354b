/// Per-client API statistics tracking
///
/// Every upstream client owns one tracker; the manager aggregates them for
/// the /stats endpoint.
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// Snapshot of a client's request statistics
#[derive(Debug, Clone, Serialize)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Rolling average over all recorded requests, in milliseconds
    pub avg_response_time_ms: f64,
    pub last_request_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StatsInner {
    total: u64,
    successes: u64,
    failures: u64,
    total_response_time_ms: f64,
    last_request_at: Option<DateTime<Utc>>,
}

/// Thread-safe statistics tracker shared by a single API client
pub struct ApiStatsTracker {
    inner: RwLock<StatsInner>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StatsInner::default()),
        }
    }

    /// Record a completed request with its outcome and elapsed time
    pub async fn record_request(&self, success: bool, response_time_ms: f64) {
        let mut inner = self.inner.write().await;
        inner.total += 1;
        if success {
            inner.successes += 1;
        } else {
            inner.failures += 1;
        }
        inner.total_response_time_ms += response_time_ms;
        inner.last_request_at = Some(Utc::now());
    }

    /// Get a snapshot of current statistics
    pub async fn get_stats(&self) -> ApiStats {
        let inner = self.inner.read().await;
        let avg = if inner.total > 0 {
            inner.total_response_time_ms / inner.total as f64
        } else {
            0.0
        };

        ApiStats {
            total_requests: inner.total,
            successful_requests: inner.successes,
            failed_requests: inner.failures,
            avg_response_time_ms: avg,
            last_request_at: inner.last_request_at,
        }
    }
}

impl Default for ApiStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_stats() {
        let tracker = ApiStatsTracker::new();
        let stats = tracker.get_stats().await;

        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.avg_response_time_ms, 0.0);
        assert!(stats.last_request_at.is_none());
    }

    #[tokio::test]
    async fn test_record_and_average() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0).await;
        tracker.record_request(false, 300.0).await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.avg_response_time_ms, 200.0);
        assert!(stats.last_request_at.is_some());
    }
}
