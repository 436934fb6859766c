//! Fatal values and the opaque operation error

use thiserror::Error;

/// Opaque error value carried through a dispatch.
///
/// Anything convertible into a boxed error works: `&str`, `String`, or any
/// concrete `std::error::Error` type.
pub type OperationError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single dispatch.
///
/// `Err` is only produced by the escalation path and is unrecoverable by
/// contract: hosts catch it at the top level of the enclosing unit of work,
/// never mid-call-stack.
pub type DispatchResult = std::result::Result<crate::sink::Disposition, Fatal>;

/// Unrecoverable error produced by an escalation handler.
///
/// A `Fatal` marks the end of the enclosing unit of work. It carries a
/// message and, when promoted from an operation error, that error as its
/// source.
#[derive(Debug, Error)]
#[error("fatal: {message}")]
pub struct Fatal {
    message: String,
    #[source]
    source: Option<OperationError>,
}

impl Fatal {
    /// Create a fatal value with a message and no source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a fatal value that wraps the operation error it was promoted
    /// from.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: OperationError) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }

    /// The escalation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<OperationError> for Fatal {
    fn from(err: OperationError) -> Self {
        let message = err.to_string();
        Self::with_source(message, err)
    }
}
