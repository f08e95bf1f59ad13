//! Error types for Pagewise
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The engine never retries or swallows errors; propagation to the output
//! stream is the only recovery policy.

use thiserror::Error;

/// The main error type for Pagewise
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Session Errors
    // ============================================================================
    /// The stepping function failed while fetching a page. Terminal for the
    /// session; the engine does not retry.
    #[error("page fetch failed: {message}")]
    Fetch {
        /// What went wrong, as reported by the fetcher
        message: String,
    },

    /// The trigger source itself failed. Terminal for the session.
    #[error("trigger source failed: {message}")]
    Upstream {
        /// What went wrong, as reported by the trigger source
        message: String,
    },

    // ============================================================================
    // Fetcher Convenience Errors
    // ============================================================================
    /// A wire response failed to decode
    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An IO failure inside a fetcher
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Free-form error, mostly produced by [`ResultExt`] context wrapping
    #[error("{0}")]
    Other(String),

    /// Escape hatch for fetchers built on `anyhow`
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create an upstream (trigger source) error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Check if this error came from the stepping function
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Check if this error came from the trigger source
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

/// Result type alias for Pagewise
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::fetch("connection reset");
        assert_eq!(err.to_string(), "page fetch failed: connection reset");

        let err = Error::upstream("subject closed");
        assert_eq!(err.to_string(), "trigger source failed: subject closed");
    }

    #[test]
    fn test_error_kind_predicates() {
        assert!(Error::fetch("x").is_fetch());
        assert!(!Error::fetch("x").is_upstream());
        assert!(Error::upstream("x").is_upstream());
        assert!(!Error::Other("x".into()).is_fetch());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::fetch("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: page fetch failed: inner"));
    }
}
