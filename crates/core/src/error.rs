use thiserror::Error;

/// Errors raised while building or parsing domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but its value is not acceptable.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A string did not match any variant of a closed enum.
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// The bundled or configured resource catalog could not be read.
    #[error("resource catalog: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Trim a required text field, rejecting absent and blank values.
pub fn required_text(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(CoreError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("country", Some("  US ".to_owned())).unwrap(), "US");
    }

    #[test]
    fn required_text_rejects_blank_and_missing() {
        assert_eq!(
            required_text("country", Some("   ".to_owned())),
            Err(CoreError::MissingField("country"))
        );
        assert_eq!(required_text("country", None), Err(CoreError::MissingField("country")));
    }
}
