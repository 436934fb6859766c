//! Diagnostic sink abstraction
//!
//! The sink is process-wide state owned by the host application; the
//! dispatcher only writes to it. It is injected per invocation rather than
//! reached through a global so tests can substitute a capturing sink.

use std::panic::Location;
use std::sync::Mutex;

/// Outcome label attached to each diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The outcome was a success; the success continuation (if any) ran.
    Succeeded,
    /// The outcome was an error handled by the failure continuation or
    /// dropped silently.
    Failed,
    /// The outcome was an error promoted to a [`Fatal`](crate::Fatal) value.
    Escalated,
    /// No precomputed error and no operation were configured; nothing ran.
    Skipped,
}

impl Disposition {
    /// Stable label used in log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Escalated => "escalated",
            Self::Skipped => "skipped",
        }
    }
}

/// One diagnostic record, emitted per verbose dispatch.
#[derive(Debug)]
pub struct DispatchRecord<'a> {
    /// Branch the dispatch took.
    pub disposition: Disposition,
    /// Static message configured on the invocation, if any.
    pub message: Option<&'a str>,
    /// Display text of the outcome error, when the outcome was an error.
    pub error: Option<&'a str>,
    /// Source location of the `run` call site.
    pub caller: &'static Location<'static>,
}

/// Destination for dispatch diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Record one dispatch outcome.
    fn record(&self, record: &DispatchRecord<'_>);
}

/// Default sink: one `tracing` event per record, leveled by disposition.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, record: &DispatchRecord<'_>) {
        let label = record.disposition.as_str();
        match record.disposition {
            Disposition::Escalated => tracing::error!(
                caller = %record.caller,
                note = record.message,
                error = record.error,
                "dispatch {label}"
            ),
            Disposition::Failed => tracing::warn!(
                caller = %record.caller,
                note = record.message,
                error = record.error,
                "dispatch {label}"
            ),
            Disposition::Succeeded | Disposition::Skipped => tracing::debug!(
                caller = %record.caller,
                note = record.message,
                "dispatch {label}"
            ),
        }
    }
}

/// Owned snapshot of a [`DispatchRecord`], stored by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDispatch {
    /// Branch the dispatch took.
    pub disposition: Disposition,
    /// Static message configured on the invocation, if any.
    pub message: Option<String>,
    /// Display text of the outcome error, when the outcome was an error.
    pub error: Option<String>,
    /// File of the `run` call site.
    pub caller_file: String,
    /// Line of the `run` call site.
    pub caller_line: u32,
}

/// Capturing sink for tests and introspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<RecordedDispatch>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in order.
    #[must_use]
    pub fn records(&self) -> Vec<RecordedDispatch> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of records captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, record: &DispatchRecord<'_>) {
        let snapshot = RecordedDispatch {
            disposition: record.disposition,
            message: record.message.map(str::to_owned),
            error: record.error.map(str::to_owned),
            caller_file: record.caller.file().to_owned(),
            caller_line: record.caller.line(),
        };
        if let Ok(mut records) = self.records.lock() {
            records.push(snapshot);
        }
    }
}
