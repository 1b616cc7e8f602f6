//! Offset/limit helpers for list endpoints.

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Upper bound on a single page.
pub const MAX_LIMIT: i64 = 1000;

/// Clamp a user-provided limit to `0..=max`, falling back to `default`.
///
/// Zero and negative values yield an empty page rather than an error.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(0, max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
