//! Error types for PixGuard

/// Result type alias using PixGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for PixGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors (bad label set, unreadable config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Model artifact errors (missing file, corrupt or structurally invalid)
    #[error("artifact error: {0}")]
    Artifact(String),

    /// The model output length does not match the configured label set.
    /// Kept distinct from `Config` so callers can never confuse it with a
    /// recoverable per-request condition.
    #[error("label mismatch: model produces {actual} outputs but label set has {expected} labels")]
    LabelMismatch { expected: usize, actual: usize },

    /// Unexpected failure during inference
    #[error("inference error: {0}")]
    Inference(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Whether this error is fatal at startup rather than a request-scoped
    /// failure. The server refuses to start on these.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Artifact(_) | Self::LabelMismatch { .. }
        )
    }
}
