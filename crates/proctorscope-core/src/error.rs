//! Error types for ProctorScope

/// Result type alias using ProctorScope's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ProctorScope operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The detector collaborator is not ready to serve requests
    #[error("detector unavailable: {0}")]
    DetectorUnavailable(String),

    /// Raw image bytes could not be decoded into pixels
    #[error("image decode failed: {0}")]
    Decode(String),

    /// The detector failed while running inference
    #[error("detector inference failed: {0}")]
    Detector(String),

    /// More images were submitted than a batch may carry
    #[error("batch of {got} images exceeds the limit of {limit}")]
    BatchTooLarge { got: usize, limit: usize },

    /// Configuration errors (taxonomy files, startup values)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new detector-unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::DetectorUnavailable(msg.into())
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new detector error
    pub fn detector(msg: impl Into<String>) -> Self {
        Self::Detector(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
