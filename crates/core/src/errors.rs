use thiserror::Error;

/// Failure at the key-value persistence boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(String),
    #[error("could not encode value for `{key}`: {message}")]
    Encode { key: String, message: String },
    #[error("could not decode value stored at `{key}`: {message}")]
    Decode { key: String, message: String },
}

impl StorageError {
    pub fn backend(error: impl std::fmt::Display) -> Self {
        Self::Backend(error.to_string())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("{kind} `{id}` was not found")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage",
            Self::Configuration(_) => "config_validation",
            Self::NotFound { .. } => "not_found",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Storage(_) => "The wardrobe store is unavailable. Please retry shortly.",
            Self::Configuration(_) => "The configuration is invalid. Run `wardrobe config`.",
            Self::NotFound { .. } => "Nothing matched the requested id.",
            Self::InvalidInput(_) => "The request could not be processed. Check inputs and try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, StorageError};

    #[test]
    fn storage_error_maps_to_storage_class() {
        let error = ApplicationError::from(StorageError::backend("database is locked"));

        assert_eq!(error.error_class(), "storage");
        assert_eq!(error.to_string(), "storage backend failure: database is locked");
    }

    #[test]
    fn not_found_names_the_missing_id() {
        let error = ApplicationError::NotFound { kind: "outfit", id: "a-b".to_string() };

        assert_eq!(error.error_class(), "not_found");
        assert_eq!(error.to_string(), "outfit `a-b` was not found");
        assert_eq!(error.user_message(), "Nothing matched the requested id.");
    }
}
