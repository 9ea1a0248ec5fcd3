use thiserror::Error;

/// Core error type for recording-file operations
#[derive(Error, Debug)]
pub enum NeurodataError {
    /// IO errors from file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A unit, row, column, or file section that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid argument errors, reported before any store access
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Parameter value outside its declared bounds
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parameter registry key errors
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Errors from the parameter persistence round-trip
    #[error("Persistence error: {0}")]
    Persist(#[from] serde_json::Error),

    /// Internal errors that shouldn't happen
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for recording-file operations
pub type Result<T> = std::result::Result<T, NeurodataError>;

impl NeurodataError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        NeurodataError::NotFound(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        NeurodataError::InvalidArgument(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        NeurodataError::Validation(msg.into())
    }

    /// Create a new key-not-found error
    pub fn key_not_found<S: Into<String>>(msg: S) -> Self {
        NeurodataError::KeyNotFound(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        NeurodataError::Internal(msg.into())
    }
}

/// Extension trait to add context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, ctx: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<NeurodataError>,
{
    fn context<S: Into<String>>(self, ctx: S) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            NeurodataError::Internal(format!("{}: {}", ctx.into(), base_error))
        })
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            NeurodataError::Internal(format!("{}: {}", f().into(), base_error))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = NeurodataError::not_found("unit 42");
        assert_eq!(err.to_string(), "Not found: unit 42");

        let err = NeurodataError::validation("value out of range");
        assert_eq!(err.to_string(), "Validation error: value out of range");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: NeurodataError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_context() {
        fn failing_operation() -> Result<()> {
            Err(NeurodataError::invalid_argument("bad input"))
        }

        let result = failing_operation().context("During structure walk");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("During structure walk"));
    }

    #[test]
    fn test_error_with_context() {
        fn failing_operation() -> Result<()> {
            Err(NeurodataError::not_found("spike_times"))
        }

        let filename = "session.nwb";
        let result = failing_operation().with_context(|| format!("Reading file: {}", filename));

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Reading file: session.nwb"));
    }
}
