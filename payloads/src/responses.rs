use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Application-wide statistics computed by the backend.
///
/// Counts are totals over live rows at the time the backend assembled the
/// document; the frontend displays them as-is without recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStats {
    pub user_count: i64,
    pub post_count: i64,
    pub comment_count: i64,
    /// Sessions with activity inside the backend's activity window.
    pub active_sessions: i64,
    /// When the backend computed these numbers.
    pub generated_at: Timestamp,
}
