//! Configuration-space invariants for the dispatch branch
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use verdict::{DiagnosticSink, Dispatch, Disposition, Fatal, MemorySink, Scope};

#[derive(Debug, Clone, Copy)]
enum OperationKind {
    Absent,
    Succeeds,
    Fails,
}

fn operation_kind() -> impl Strategy<Value = OperationKind> {
    prop_oneof![
        Just(OperationKind::Absent),
        Just(OperationKind::Succeeds),
        Just(OperationKind::Fails),
    ]
}

proptest! {
    #[test]
    fn every_configuration_takes_exactly_one_branch(
        precomputed in any::<bool>(),
        operation in operation_kind(),
        with_success in any::<bool>(),
        with_failure in any::<bool>(),
        with_escalation in any::<bool>(),
        verbose in any::<bool>(),
    ) {
        let scope = Scope::new();
        let sink = Arc::new(MemorySink::new());
        let success_calls = Arc::new(AtomicUsize::new(0));
        let failure_calls = Arc::new(AtomicUsize::new(0));
        let operation_runs = Arc::new(AtomicUsize::new(0));

        let mut dispatch = Dispatch::new()
            .verbose(verbose)
            .sink(Arc::clone(&sink) as Arc<dyn DiagnosticSink>);
        if precomputed {
            dispatch = dispatch.with_error("precomputed failure");
        }
        match operation {
            OperationKind::Absent => {}
            OperationKind::Succeeds => {
                let runs = Arc::clone(&operation_runs);
                dispatch = dispatch.operation(move |_| {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
            }
            OperationKind::Fails => {
                let runs = Arc::clone(&operation_runs);
                dispatch = dispatch.operation(move |_| {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Err("operation failure".into())
                });
            }
        }
        if with_success {
            let calls = Arc::clone(&success_calls);
            dispatch = dispatch.on_success(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }
        if with_failure {
            let calls = Arc::clone(&failure_calls);
            dispatch = dispatch.on_failure(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }
        if with_escalation {
            dispatch = dispatch.escalate_with(Fatal::from);
        }

        let result = dispatch.run(&scope);

        let operation_present = !matches!(operation, OperationKind::Absent);
        let operation_expected = !precomputed && operation_present;
        let no_outcome = !precomputed && !operation_present;
        let error_outcome =
            precomputed || (operation_expected && matches!(operation, OperationKind::Fails));

        // A precomputed error suppresses the operation; otherwise it runs once.
        prop_assert_eq!(
            operation_runs.load(Ordering::SeqCst),
            usize::from(operation_expected)
        );

        // Escalation is the only Err surface, taken iff configured on an error.
        let escalated = error_outcome && with_escalation;
        prop_assert_eq!(result.is_err(), escalated);
        if let Ok(disposition) = &result {
            let expected = if no_outcome {
                Disposition::Skipped
            } else if error_outcome {
                Disposition::Failed
            } else {
                Disposition::Succeeded
            };
            prop_assert_eq!(*disposition, expected);
        }

        // The matching continuation fires exactly once, the others never.
        let success_expected = usize::from(!no_outcome && !error_outcome && with_success);
        let failure_expected = usize::from(error_outcome && !with_escalation && with_failure);
        prop_assert_eq!(success_calls.load(Ordering::SeqCst), success_expected);
        prop_assert_eq!(failure_calls.load(Ordering::SeqCst), failure_expected);

        let taken = success_calls.load(Ordering::SeqCst)
            + failure_calls.load(Ordering::SeqCst)
            + usize::from(result.is_err());
        prop_assert!(taken <= 1);

        // One record per verbose dispatch, tagged with the final disposition.
        prop_assert_eq!(sink.len(), usize::from(verbose));
        if verbose {
            let records = sink.records();
            let expected = if no_outcome {
                Disposition::Skipped
            } else if escalated {
                Disposition::Escalated
            } else if error_outcome {
                Disposition::Failed
            } else {
                Disposition::Succeeded
            };
            prop_assert_eq!(records[0].disposition, expected);
            prop_assert_eq!(records[0].error.is_some(), error_outcome);
        }
    }
}
