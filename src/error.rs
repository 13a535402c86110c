use thiserror::Error;

/// Result type alias for format operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for entity and format operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Get or set of an attribute outside the entity's whitelist.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A document did not match any known version shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Invalid constructor argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV reader/writer machinery errors.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl Error {
    /// Create an unknown-attribute error for the given key.
    pub fn unknown_attribute(key: impl Into<String>) -> Self {
        Self::UnknownAttribute(key.into())
    }

    /// Create a malformed-input error.
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a CSV error.
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::Csv(msg.into())
    }
}
