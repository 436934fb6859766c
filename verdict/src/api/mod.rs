//! Builder API for assembling and running a dispatch

pub mod builder;
pub mod execute;

pub use builder::{Continuation, Dispatch, Escalation, Operation};
