//! Shared constants for prepdesk.

/// Number of catalog resources recommended to each prospect.
pub const RECOMMENDED_RESOURCE_COUNT: usize = 3;

/// PostgreSQL connection pool: default maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 10;

/// Upper bound on any single store call, in seconds.
pub const STORE_CALL_TIMEOUT_SECS: u64 = 10;

/// Timeout for the fire-and-forget enrichment webhook, in seconds.
pub const WEBHOOK_TIMEOUT_SECS: u64 = 5;

/// Maximum number of chat turns accepted in one transcript write.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 500;

/// Default HTTP bind port.
pub const DEFAULT_PORT: u16 = 3000;
