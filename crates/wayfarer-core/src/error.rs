//! Error types for Wayfarer.

/// Errors that can occur across the Wayfarer crates.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Transport-level HTTP failure (connect, TLS, body decode).
    #[error("HTTP error: {message}")]
    Http {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An upstream service answered with a non-success status.
    #[error("{service} returned HTTP {status}")]
    Upstream {
        /// Service name (nominatim, osrm, overpass, ...)
        service: String,
        /// HTTP status code
        status: u16,
    },

    /// LLM provider error (API failures, malformed responses, etc.)
    #[error("LLM error: {message}")]
    Llm {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// I/O error (file operations, terminal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Asking the human failed (no terminal, closed input, ...)
    #[error("Prompt error: {message}")]
    Prompt {
        /// What went wrong
        message: String,
    },

    /// Operation timeout
    #[error("Timed out after {seconds}s")]
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },
}

/// Convenience `Result` type alias for Wayfarer operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Transport failures, timeouts, rate limits (429) and server-side
    /// failures (5xx) are retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http { .. } => true,
            Error::Llm { .. } => true,
            Error::Io(_) => true,
            Error::Timeout { .. } => true,
            Error::Upstream { status, .. } => *status == 429 || *status >= 500,
            Error::Validation { .. } => false,
            Error::Serialization(_) => false,
            Error::Config { .. } => false,
            Error::Prompt { .. } => false,
        }
    }

    /// Creates a new HTTP error with a message.
    pub fn http<S: Into<String>>(message: S) -> Self {
        Error::Http {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new HTTP error with a message and source error.
    pub fn http_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Http {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new upstream status error.
    pub fn upstream<S: Into<String>>(service: S, status: u16) -> Self {
        Error::Upstream {
            service: service.into(),
            status,
        }
    }

    /// Creates a new LLM error with a message.
    pub fn llm<S: Into<String>>(message: S) -> Self {
        Error::Llm {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new LLM error with a message and source error.
    pub fn llm_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Llm {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new prompt error.
    pub fn prompt<S: Into<String>>(message: S) -> Self {
        Error::Prompt {
            message: message.into(),
        }
    }
}
