//! SEAMCHECK - data-access seam, mock substitution harness and MC/DC analysis
//!
//! Business components talk to their data source through the
//! [`seam::DataAccess`] trait. Production code binds a real source, unit
//! tests bind a [`harness::MockDataAccess`] programmed with expectations,
//! and [`coverage`] checks whether a test set reaches MC/DC on a decision.

pub mod cli;
pub mod components;
pub mod coverage;
pub mod harness;
pub mod seam;

/// Re-export key items for easier access in tests
pub use components::{check_abort, ComponentA};
pub use harness::{HarnessConfig, HarnessError, MockDataAccess};
pub use seam::{DataAccess, MemoryDataAccess, MyDataType, Status, MY_DATA_ARRAY_SIZE, STATUS_OK};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize the logging system
pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("seamcheck", level)
        .format_timestamp_secs()
        .init();
}

/// Initialize logging for tests; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::Builder::new()
        .filter_module("seamcheck", log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
