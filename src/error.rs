//! Central error handling for the conversion pipeline.

/// Unified error type for all conversion operations
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("invalid height field shape: {0}")]
    InvalidShape(String),

    #[error("height field contains no meshable region")]
    EmptyGeometry,

    #[error("could not decode input: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Convenience constructors for common error types
    pub fn invalid_shape<T: ToString>(msg: T) -> Self {
        ConvertError::InvalidShape(msg.to_string())
    }

    pub fn decode<T: ToString>(msg: T) -> Self {
        ConvertError::Decode(msg.to_string())
    }
}
