use std::fmt;

use thiserror::Error;

use super::Operation;

/// Failure raised by an action while it runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// An array action carries a different number of elements than the
    /// output buffer holds. Nothing is written.
    #[error("array action supplies {actual} elements but the buffer holds {expected}")]
    ArrayLength { expected: usize, actual: usize },
}

/// Everything the harness reports as a test failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("unexpected call: {operation}({arguments}) has no expectation or default")]
    UnexpectedCall {
        operation: Operation,
        arguments: String,
    },

    #[error("unmatched call: {operation}({arguments}); {}", reasons.join("; "))]
    UnmatchedCall {
        operation: Operation,
        arguments: String,
        /// Why each candidate expectation rejected the call
        reasons: Vec<String>,
    },

    #[error("unsatisfied expectation: {expectation} expected to be called {expected}, actually called {actual} time(s)")]
    Unsatisfied {
        operation: Operation,
        expectation: String,
        expected: String,
        actual: usize,
    },

    #[error("out of sequence: {operation} matched {expectation} while {pending} is still unsatisfied")]
    OutOfSequence {
        operation: Operation,
        expectation: String,
        pending: String,
    },

    #[error("action failed in {operation}: {source}")]
    Action {
        operation: Operation,
        #[source]
        source: ActionError,
    },
}

impl HarnessError {
    /// Operation the failure was reported against
    pub fn operation(&self) -> Operation {
        match self {
            Self::UnexpectedCall { operation, .. }
            | Self::UnmatchedCall { operation, .. }
            | Self::Unsatisfied { operation, .. }
            | Self::OutOfSequence { operation, .. }
            | Self::Action { operation, .. } => *operation,
        }
    }
}

/// All failures collected by a verification pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct VerifyError {
    pub failures: Vec<HarnessError>,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mock verification failed with {} failure(s)",
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}
