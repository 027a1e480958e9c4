// Typed errors with thiserror. Every variant degrades a feature; none halts the page.

use thiserror::Error;

/// Portfolio client error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    #[error("Missing page element: {0}")]
    MissingElement(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Submit transport failed: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for PortfolioError {
    fn from(err: serde_json::Error) -> Self {
        PortfolioError::Serialization(err.to_string())
    }
}
