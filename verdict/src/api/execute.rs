//! Dispatch execution
//!
//! The three-way branch itself, kept separate from the builder state.

use std::panic::Location;

use super::builder::Dispatch;
use crate::error::DispatchResult;
use crate::scope::Scope;
use crate::sink::{DispatchRecord, Disposition};

impl Dispatch {
    /// Execute the configured dispatch against `scope`.
    ///
    /// Resolves the outcome (precomputed error, or the operation's result,
    /// or nothing), then routes control to at most one continuation:
    ///
    /// 1. error + escalation handler: the handler promotes the error and
    ///    the fatal value is returned as `Err`. Non-recoverable by
    ///    contract.
    /// 2. error + failure continuation: the continuation runs with the
    ///    scope; returns `Ok(Disposition::Failed)`.
    /// 3. success + success continuation: the continuation runs with the
    ///    scope; returns `Ok(Disposition::Succeeded)`.
    ///
    /// With neither a precomputed error nor an operation the dispatch is a
    /// no-op and returns `Ok(Disposition::Skipped)`. When verbose, exactly
    /// one record tagged with the call site reaches the sink before any
    /// continuation runs.
    #[track_caller]
    pub fn run(self, scope: &Scope) -> DispatchResult {
        let caller = Location::caller();
        let Dispatch {
            precomputed,
            operation,
            on_success,
            on_failure,
            escalation,
            verbose,
            success_message,
            failure_message,
            sink,
        } = self;

        // A precomputed error always suppresses the operation.
        let outcome = match (precomputed, operation) {
            (Some(err), _) => Some(Err(err)),
            (None, Some(operation)) => Some(operation(scope)),
            (None, None) => None,
        };

        let Some(outcome) = outcome else {
            if verbose {
                sink.record(&DispatchRecord {
                    disposition: Disposition::Skipped,
                    message: None,
                    error: None,
                    caller,
                });
            }
            return Ok(Disposition::Skipped);
        };

        match outcome {
            Ok(()) => {
                if verbose {
                    sink.record(&DispatchRecord {
                        disposition: Disposition::Succeeded,
                        message: success_message.as_deref(),
                        error: None,
                        caller,
                    });
                }
                if let Some(continuation) = on_success {
                    continuation(scope);
                }
                Ok(Disposition::Succeeded)
            }
            Err(err) => {
                let disposition = if escalation.is_some() {
                    Disposition::Escalated
                } else {
                    Disposition::Failed
                };
                if verbose {
                    let text = err.to_string();
                    sink.record(&DispatchRecord {
                        disposition,
                        message: failure_message.as_deref(),
                        error: Some(&text),
                        caller,
                    });
                }
                if let Some(escalation) = escalation {
                    return Err(escalation(err));
                }
                if let Some(continuation) = on_failure {
                    continuation(scope);
                }
                Ok(Disposition::Failed)
            }
        }
    }
}
