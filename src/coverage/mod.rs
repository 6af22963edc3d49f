//! MC/DC (Modified Condition/Decision Coverage) analysis
//!
//! A test set achieves MC/DC for a decision when every condition has an
//! independence pair: two vectors in which only that condition changes
//! (conditions skipped by short-circuiting do not count) and the decision
//! outcome changes with it.

pub mod decision;
pub mod mcdc;

use thiserror::Error;

pub use decision::{Decision, Evaluation};
pub use mcdc::{analyze, format_vector, parse_vector, ConditionCoverage, McdcReport};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum McdcError {
    #[error("test vector supplies {actual} condition value(s), decision needs {needed}")]
    VectorTooShort { needed: usize, actual: usize },

    #[error("invalid test vector {0:?}: expected only T/F/1/0")]
    InvalidVector(String),
}
