//! Environment-driven configuration with warn-level logging for invalid values.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{PG_POOL_MAX_CONNECTIONS, STORE_CALL_TIMEOUT_SECS};

pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_LLM_MODEL: &str = "moonshotai/kimi-k2-instruct";

/// Parse a raw variable value with a default fallback.
///
/// - Unset or blank: returns `default` silently.
/// - Set but unparsable: logs a warning and returns `default`.
pub fn parse_with_default<T: FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw.as_deref().map(str::trim) {
        None | Some("") => default,
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(var, value = %v, default = %default, "invalid env var value, using default");
                default
            },
        },
    }
}

/// [`parse_with_default`] against the process environment.
pub fn env_parse_with_default<T: FromStr + std::fmt::Display>(var: &str, default: T) -> T {
    parse_with_default(var, std::env::var(var).ok(), default)
}

/// Everything the server reads from the environment at startup.
#[derive(Clone)]
pub struct ServiceConfig {
    pub database_url: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_api_url: String,
    pub llm_model: String,
    pub store_timeout: Duration,
    pub pg_max_connections: u32,
    pub resource_catalog: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| "***"))
            .field("llm_api_url", &self.llm_api_url)
            .field("llm_model", &self.llm_model)
            .field("store_timeout", &self.store_timeout)
            .field("pg_max_connections", &self.pg_max_connections)
            .field("resource_catalog", &self.resource_catalog)
            .field("webhook_url", &self.webhook_url)
            .field("webhook_token", &self.webhook_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests never touch process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let timeout_secs = parse_with_default(
            "PREPDESK_STORE_TIMEOUT_SECS",
            lookup("PREPDESK_STORE_TIMEOUT_SECS"),
            STORE_CALL_TIMEOUT_SECS,
        );
        Self {
            database_url: non_empty("DATABASE_URL"),
            llm_api_key: non_empty("PREPDESK_LLM_API_KEY").or_else(|| non_empty("GROQ_API_KEY")),
            llm_api_url: non_empty("PREPDESK_LLM_API_URL")
                .unwrap_or_else(|| DEFAULT_LLM_API_URL.to_owned()),
            llm_model: non_empty("PREPDESK_LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_owned()),
            store_timeout: Duration::from_secs(timeout_secs.max(1)),
            pg_max_connections: parse_with_default(
                "PREPDESK_PG_MAX_CONNECTIONS",
                lookup("PREPDESK_PG_MAX_CONNECTIONS"),
                PG_POOL_MAX_CONNECTIONS,
            ),
            resource_catalog: non_empty("PREPDESK_RESOURCE_CATALOG").map(PathBuf::from),
            webhook_url: non_empty("ENRICHMENT_WEBHOOK_URL"),
            webhook_token: non_empty("ENRICHMENT_WEBHOOK_TOKEN"),
        }
    }
}
