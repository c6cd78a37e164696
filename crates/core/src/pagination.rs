//! Page-size and offset helpers shared by list endpoints.

/// Records returned per review page when the caller gives no usable limit.
pub const DEFAULT_REVIEW_LIMIT: i64 = 10;

/// Default upper bound on a review page; overridable via configuration.
pub const MAX_REVIEW_LIMIT: i64 = 100;

/// Default page size for history listings.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Maximum page size for history listings.
pub const MAX_HISTORY_LIMIT: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Resolve the raw `limit` query value of the review queue.
///
/// Missing, non-numeric, and zero values all fall back to
/// [`DEFAULT_REVIEW_LIMIT`]; anything else is clamped to `[1, max]`.
pub fn resolve_review_limit(raw: Option<&str>, max: i64) -> i64 {
    let parsed = raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n != 0);
    clamp_limit(parsed, DEFAULT_REVIEW_LIMIT, max)
}
