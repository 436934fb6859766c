//! Outcome dispatch: route an operation's result to caller-supplied
//! continuations.
//!
//! A [`Dispatch`] bundles an optional precomputed error, an optional
//! operation, and up to three continuations. Running it resolves the
//! outcome once and hands control to exactly one of them: the success
//! continuation, the failure continuation, or an escalation handler that
//! promotes the error to an unrecoverable [`Fatal`] value. Callbacks
//! receive the caller's [`Scope`], a cancellable execution scope the
//! dispatcher threads through but never manages.
//!
//! ```
//! use verdict::{Dispatch, Disposition, Scope};
//!
//! let scope = Scope::new();
//! let disposition = Dispatch::new()
//!     .operation(|scope| {
//!         scope.insert("attempt", serde_json::json!(1));
//!         Ok(())
//!     })
//!     .on_success(|scope| {
//!         let _ = scope.get("attempt");
//!     })
//!     .run(&scope)?;
//!
//! assert_eq!(disposition, Disposition::Succeeded);
//! # Ok::<(), verdict::Fatal>(())
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod handlers;
pub mod scope;
pub mod sink;

pub use api::{Continuation, Dispatch, Escalation, Operation};
pub use error::{DispatchResult, Fatal, OperationError};
pub use scope::Scope;
pub use sink::{
    DiagnosticSink, DispatchRecord, Disposition, MemorySink, RecordedDispatch, TracingSink,
};
