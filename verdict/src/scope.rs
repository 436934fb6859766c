//! Cancellable execution scope threaded through dispatch callbacks
//!
//! The dispatcher neither creates nor cancels a scope; cancellation and
//! timeout policy belong to the caller that supplies it. Clones are cheap
//! and share state.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::{mpsc, watch};

/// Caller-owned execution scope handed to the operation and continuations.
///
/// Bundles a concurrent key/value store, a cooperative cancellation flag,
/// and an unbounded signal channel for ad-hoc coordination between
/// callbacks.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    values: DashMap<String, Value>,
    cancel_tx: watch::Sender<bool>,
    cancel_rx: watch::Receiver<bool>,
    signal_tx: mpsc::UnboundedSender<Value>,
    signal_rx: Mutex<mpsc::UnboundedReceiver<Value>>,
}

impl Scope {
    /// Create a fresh, un-cancelled scope.
    #[must_use]
    pub fn new() -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(ScopeInner {
                values: DashMap::new(),
                cancel_tx,
                cancel_rx,
                signal_tx,
                signal_rx: Mutex::new(signal_rx),
            }),
        }
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.inner.values.insert(key.into(), value);
    }

    /// Read back the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.values.get(key).map(|entry| entry.value().clone())
    }

    /// Cancel the scope. Visible to every clone; idempotent.
    pub fn cancel(&self) {
        let _ = self.inner.cancel_tx.send(true);
    }

    /// Whether the scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancel_rx.borrow()
    }

    /// A receiver that observes cancellation, for callers that want to
    /// `await` it. The dispatcher itself never does.
    #[must_use]
    pub fn cancelled(&self) -> watch::Receiver<bool> {
        self.inner.cancel_rx.clone()
    }

    /// Send a coordination signal to the scope's channel.
    pub fn signal(&self, value: Value) {
        let _ = self.inner.signal_tx.send(value);
    }

    /// Take the next pending signal, if any. Non-blocking; signals arrive
    /// in send order.
    #[must_use]
    pub fn next_signal(&self) -> Option<Value> {
        self.inner
            .signal_rx
            .lock()
            .ok()
            .and_then(|mut rx| rx.try_recv().ok())
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("values", &self.inner.values.len())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
