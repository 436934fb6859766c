//! Default escalation and continuations
//!
//! Pass-through defaults for callers that only want the standard behavior.

use crate::error::{Fatal, OperationError};
use crate::scope::Scope;

/// Default escalation: wrap the operation error unchanged.
#[must_use]
pub fn escalate(err: OperationError) -> Fatal {
    Fatal::from(err)
}

/// Default failure continuation: one warn-level line, nothing else.
pub fn log_failure(_scope: &Scope) {
    tracing::warn!("operation failed");
}

/// Default success continuation: one debug-level line, nothing else.
pub fn log_success(_scope: &Scope) {
    tracing::debug!("operation completed");
}
