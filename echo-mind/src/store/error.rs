//! Store Errors
//!
//! `TigerStyle`: Explicit error types with context.

use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Document not found
    #[error("not found: {what}")]
    NotFound {
        /// What was missing
        what: String,
    },

    /// Read failed
    #[error("read failed: {message}")]
    Read {
        /// Error message
        message: String,
    },

    /// Write failed
    #[error("write failed: {message}")]
    Write {
        /// Error message
        message: String,
    },

    /// (De)serialization failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// Simulated fault (for DST)
    #[error("simulated fault: {fault_type}")]
    SimulatedFault {
        /// Type of simulated fault
        fault_type: String,
    },
}

impl StoreError {
    /// Create a not-found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a read error.
    #[must_use]
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Create a write error.
    #[must_use]
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a simulated-fault error.
    #[must_use]
    pub fn simulated_fault(fault_type: impl Into<String>) -> Self {
        Self::SimulatedFault {
            fault_type: fault_type.into(),
        }
    }

    /// Whether a retry could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SimulatedFault { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let err = StoreError::not_found("echo state");
        assert!(matches!(err, StoreError::NotFound { what } if what == "echo state"));

        let err = StoreError::write("disk full");
        assert_eq!(err.to_string(), "write failed: disk full");
    }

    #[test]
    fn test_is_transient() {
        assert!(StoreError::simulated_fault("store_write_fail").is_transient());
        assert!(!StoreError::read("corrupt").is_transient());
    }
}
