//! Example components built on top of the data-access seam

pub mod check_abort;
pub mod component_a;

pub use check_abort::{
    check_abort, check_abort_decision, CHECK_ABORT_CONDITIONS, CHECK_ABORT_MCDC_VECTORS,
};
pub use component_a::{ComponentA, FAILURE_SENTINEL};
