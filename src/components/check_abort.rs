use crate::coverage::Decision;

/// Condition names of [`check_abort`], in argument order
pub const CHECK_ABORT_CONDITIONS: [&str; 3] =
    ["off_course", "abort_commanded", "valid_abort_command"];

/// Minimal test set giving [`check_abort`] full MC/DC coverage
pub const CHECK_ABORT_MCDC_VECTORS: [[bool; 3]; 4] = [
    [false, false, false],
    [false, true, false],
    [false, true, true],
    [true, false, false],
];

/// Abort when off course, or when a valid abort was commanded.
pub fn check_abort(off_course: bool, abort_commanded: bool, valid_abort_command: bool) -> bool {
    off_course || (abort_commanded && valid_abort_command)
}

/// The decision inside [`check_abort`], for coverage analysis
pub fn check_abort_decision() -> Decision {
    Decision::condition(0).or(Decision::condition(1).and(Decision::condition(2)))
}
