//! Error types for Biblio

use thiserror::Error;

use crate::validation::FieldErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A submitted form failed one or more field rules. Inside the UI this
    /// is rendered next to the fields, never raised; the variant exists for
    /// library callers that want a single error type.
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Terminal setup, drawing, or input failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
