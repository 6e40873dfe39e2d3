/// In-process cache entries younger than this are served without fetching.
pub const CACHE_TTL_MINUTES: i64 = 5;

/// Durable rows older than this are flagged stale on the read path.
pub const STALE_AFTER_MINUTES: i64 = 10;
