//! Mock substitution harness
//!
//! [`MockDataAccess`] stands in for a real [`crate::seam::DataAccess`]
//! implementation for the duration of one test. Each operation keeps its own
//! queue of expectations:
//!
//! - expectations are matched in declaration order, first declared first
//!   consumed, skipping the ones that reached their upper call bound;
//! - each call runs the next one-shot action, then the repeating action, then
//!   a default result (status `0`, no writes);
//! - a call nothing accepts falls back to the most recent matching
//!   `on_call_*` default, and fails otherwise;
//! - under [`FailurePolicy::Record`] a call that fails writes nothing and
//!   returns [`MOCK_FAILURE_STATUS`];
//! - dropping the mock fails the test when an expectation is unsatisfied.

pub mod action;
pub mod config;
pub mod error;
pub mod expectation;
pub mod matcher;
pub mod mock;

use std::fmt;

pub use action::{
    invoke, returning, set_arg_pointee, set_arg_pointees, set_array_argument, Action,
};
pub use config::{FailurePolicy, HarnessConfig};
pub use error::{ActionError, HarnessError, VerifyError};
pub use expectation::{DefaultBuilder, ExpectationBuilder, Sequence, Times};
pub use matcher::{all_of, any, elements_are, eq, field, not, pointee, predicate, Matcher};
pub use mock::{CallRecord, MockDataAccess, MOCK_FAILURE_STATUS};

/// Operations of the data-access seam, as named in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ReadSomeData,
    ReadSomeDataAndReturn,
    ReadMultipleDataAndReturn,
    ReadDataStructure,
    ReadDataStructureArray,
    ReadMyInput,
    WriteMyInput,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Self::ReadSomeData,
        Self::ReadSomeDataAndReturn,
        Self::ReadMultipleDataAndReturn,
        Self::ReadDataStructure,
        Self::ReadDataStructureArray,
        Self::ReadMyInput,
        Self::WriteMyInput,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadSomeData => "read_some_data",
            Self::ReadSomeDataAndReturn => "read_some_data_and_return",
            Self::ReadMultipleDataAndReturn => "read_multiple_data_and_return",
            Self::ReadDataStructure => "read_data_structure",
            Self::ReadDataStructureArray => "read_data_structure_array",
            Self::ReadMyInput => "read_my_input",
            Self::WriteMyInput => "write_my_input",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
