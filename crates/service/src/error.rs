//! Typed error enum for the service layer.
//!
//! Every failure a caller can act on has its own variant, so the HTTP layer
//! maps them to status codes without inspecting messages.

use prepdesk_core::CoreError;
use prepdesk_llm::LlmError;
use prepdesk_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input is missing or malformed. Nothing was written.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness rule rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store timed out or could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The text-generation provider failed or returned unusable output.
    #[error("generation failed: {0}")]
    GenerationFailure(String),

    /// An optional backend (LLM) is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Any other storage failure (SQL error, corrupt row, migration).
    #[error("storage: {0}")]
    Storage(#[source] StorageError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            StorageError::Duplicate(msg) => Self::Conflict(msg),
            StorageError::ForeignKey(msg) => Self::NotFound { entity: "referenced record", id: msg },
            StorageError::Unavailable(msg) => Self::StoreUnavailable(msg),
            other => Self::Storage(other),
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<LlmError> for ServiceError {
    fn from(err: LlmError) -> Self {
        Self::GenerationFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_service_categories() {
        assert!(matches!(
            ServiceError::from(StorageError::Unavailable("pool".into())),
            ServiceError::StoreUnavailable(_)
        ));
        assert!(matches!(
            ServiceError::from(StorageError::Duplicate("email".into())),
            ServiceError::Conflict(_)
        ));
        assert!(ServiceError::from(StorageError::not_found("meeting", 3)).is_not_found());
        assert!(matches!(
            ServiceError::from(StorageError::Migration("x".into())),
            ServiceError::Storage(_)
        ));
    }

    #[test]
    fn core_and_llm_errors_keep_their_meaning() {
        assert!(matches!(
            ServiceError::from(CoreError::MissingField("email")),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(LlmError::EmptyResponse),
            ServiceError::GenerationFailure(_)
        ));
    }
}
