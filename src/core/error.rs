//! Typed failures produced by the data pipeline

use thiserror::Error;

/// Every fetch, normalization and derivation stage resolves to one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("network failure ({provider}): {message}")]
    NetworkFailure { provider: String, message: String },

    #[error("unexpected schema ({provider}): {message}")]
    SchemaMismatch { provider: String, message: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("missing configuration: {0}")]
    ConfigurationMissing(String),
}

impl PipelineError {
    pub fn network(provider: &str, message: impl Into<String>) -> Self {
        PipelineError::NetworkFailure {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn schema(provider: &str, message: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Collapses an upstream failure into the reason a derived metric is missing.
    pub fn as_insufficient(&self, what: &str) -> Self {
        match self {
            PipelineError::InsufficientData(_) => self.clone(),
            other => PipelineError::InsufficientData(format!("{what}: {other}")),
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
