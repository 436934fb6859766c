//! Invocation configuration builder
//!
//! A [`Dispatch`] is assembled immediately before the call, consumed by
//! exactly one [`run`](Dispatch::run), and discarded. There is no identity
//! beyond the call stack frame.

use std::sync::Arc;

use crate::error::{Fatal, OperationError};
use crate::scope::Scope;
use crate::sink::{DiagnosticSink, TracingSink};

/// Operation closure: receives the scope, yields the outcome.
pub type Operation = Box<dyn FnOnce(&Scope) -> Result<(), OperationError> + Send>;

/// Continuation invoked with the scope on the branch it was configured for.
pub type Continuation = Box<dyn FnOnce(&Scope) + Send>;

/// Promotes an operation error to a [`Fatal`] value.
pub type Escalation = Box<dyn FnOnce(OperationError) -> Fatal + Send>;

/// Caller-assembled invocation configuration.
///
/// All parts are optional; an empty configuration dispatches to nothing.
/// Exactly one of the success, failure, or escalation paths executes per
/// [`run`](Dispatch::run), and a precomputed error always suppresses the
/// operation.
pub struct Dispatch {
    pub(crate) precomputed: Option<OperationError>,
    pub(crate) operation: Option<Operation>,
    pub(crate) on_success: Option<Continuation>,
    pub(crate) on_failure: Option<Continuation>,
    pub(crate) escalation: Option<Escalation>,
    pub(crate) verbose: bool,
    pub(crate) success_message: Option<String>,
    pub(crate) failure_message: Option<String>,
    pub(crate) sink: Arc<dyn DiagnosticSink>,
}

impl Dispatch {
    /// Empty configuration recording to the default tracing sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            precomputed: None,
            operation: None,
            on_success: None,
            on_failure: None,
            escalation: None,
            verbose: false,
            success_message: None,
            failure_message: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// Supply an error that already occurred upstream.
    ///
    /// The outcome is then that error, and the operation never runs.
    #[must_use]
    pub fn with_error(mut self, err: impl Into<OperationError>) -> Self {
        self.precomputed = Some(err.into());
        self
    }

    /// Supply the operation to perform when no error is precomputed.
    #[must_use]
    pub fn operation<F>(mut self, operation: F) -> Self
    where
        F: FnOnce(&Scope) -> Result<(), OperationError> + Send + 'static,
    {
        self.operation = Some(Box::new(operation));
        self
    }

    /// Continuation for the success branch.
    #[must_use]
    pub fn on_success<F>(mut self, continuation: F) -> Self
    where
        F: FnOnce(&Scope) + Send + 'static,
    {
        self.on_success = Some(Box::new(continuation));
        self
    }

    /// Continuation for the failure branch.
    ///
    /// Never invoked when an escalation handler is also configured;
    /// escalation takes priority.
    #[must_use]
    pub fn on_failure<F>(mut self, continuation: F) -> Self
    where
        F: FnOnce(&Scope) + Send + 'static,
    {
        self.on_failure = Some(Box::new(continuation));
        self
    }

    /// Promote an error outcome to a [`Fatal`] value returned from
    /// [`run`](Dispatch::run).
    #[must_use]
    pub fn escalate_with<F>(mut self, escalation: F) -> Self
    where
        F: FnOnce(OperationError) -> Fatal + Send + 'static,
    {
        self.escalation = Some(Box::new(escalation));
        self
    }

    /// Record the taken branch to the diagnostic sink.
    #[must_use]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Static message carried on the success record.
    #[must_use]
    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Static message carried on the failure or escalation record.
    #[must_use]
    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }

    /// Substitute the diagnostic sink for this invocation.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl Default for Dispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("precomputed", &self.precomputed.is_some())
            .field("operation", &self.operation.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .field("escalation", &self.escalation.is_some())
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
