use std::panic::{self, AssertUnwindSafe};

use proptest::prelude::*;
use seamcheck::components::{ComponentA, FAILURE_SENTINEL};
use seamcheck::harness::{
    self, eq, returning, set_arg_pointee, set_arg_pointees, set_array_argument, FailurePolicy,
    HarnessConfig, HarnessError, MockDataAccess, Operation, Sequence, Times, MOCK_FAILURE_STATUS,
};
use seamcheck::seam::{try_read_multiple_data, try_read_some_data};
use seamcheck::{DataAccess, MyDataType, MY_DATA_ARRAY_SIZE};

fn recording() -> MockDataAccess {
    MockDataAccess::with_config(HarnessConfig::new().failure_policy(FailurePolicy::Record))
}

/// Runs the status scenario on a fresh mock and reports what the component saw
fn status_scenario(status: i32) -> (i32, bool) {
    seamcheck::init_test_logging();
    let mock = MockDataAccess::new();
    mock.expect_read_some_data_and_return()
        .will_once(set_arg_pointee(13).and_return(status));
    let value = ComponentA::new(&mock).check_read_some_data_and_return();
    (value, mock.verify().is_ok())
}

#[test]
fn test_fresh_mocks_are_idempotent() {
    assert_eq!(status_scenario(0), status_scenario(0));
    assert_eq!(status_scenario(1), status_scenario(1));
    assert_eq!(status_scenario(0), (13, true));
    assert_eq!(status_scenario(1), (FAILURE_SENTINEL, true));
}

#[test]
fn test_failure_does_not_leak_into_next_mock() {
    let failing = recording();
    failing.write_my_input(&1);
    assert_eq!(failing.take_failures().len(), 1);

    let fresh = MockDataAccess::new();
    assert!(fresh.verify().is_ok());
    assert!(fresh.calls().is_empty());
}

#[test]
fn test_expectations_consumed_in_declaration_order() {
    let mock = MockDataAccess::new();
    mock.expect_read_some_data().will_once(set_arg_pointee(1));
    mock.expect_read_some_data().will_once(set_arg_pointee(2));
    mock.expect_read_some_data().will_once(set_arg_pointee(3));

    let component = ComponentA::new(&mock);
    let seen: Vec<i32> = (0..3).map(|_| component.check_read_some_data()).collect();
    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn test_once_then_repeatedly() {
    let mock = MockDataAccess::new();
    mock.expect_read_some_data()
        .will_once(set_arg_pointee(1))
        .will_repeatedly(set_arg_pointee(7));

    let component = ComponentA::new(&mock);
    assert_eq!(component.check_read_some_data(), 1);
    assert_eq!(component.check_read_some_data(), 7);
    assert_eq!(component.check_read_some_data(), 7);
}

#[test]
fn test_explicit_times_caps_calls() {
    let mock = recording();
    mock.expect_read_my_input()
        .times(Times::AtMost(1))
        .will_repeatedly(set_arg_pointee(4));

    let mut value = 0;
    mock.read_my_input(&mut value);
    mock.read_my_input(&mut value);

    let failures = mock.take_failures();
    assert!(matches!(
        &failures[..],
        [HarnessError::UnmatchedCall { reasons, .. }] if reasons[0].contains("saturated")
    ));
}

#[test]
fn test_standing_default_replaces_unexpected_call() {
    seamcheck::init_test_logging();
    let mock = MockDataAccess::new();
    mock.on_call_read_some_data_and_return()
        .will_by_default(set_arg_pointee(99).and_return(1));
    mock.expect_read_some_data_and_return()
        .will_once(set_arg_pointee(13).and_return(0));

    let component = ComponentA::new(&mock);
    assert_eq!(component.check_read_some_data_and_return(), 13);
    // Expectation used up, the default answers from now on
    assert_eq!(component.check_read_some_data_and_return(), FAILURE_SENTINEL);
    assert_eq!(component.check_read_some_data_and_return(), FAILURE_SENTINEL);
    assert_eq!(mock.call_count(Operation::ReadSomeDataAndReturn), 3);
}

#[test]
fn test_unmatched_arguments_named_in_diagnostic() {
    let mock = recording();
    mock.expect_read_multiple_data_and_return()
        .with((eq(0), eq(0)))
        .will_once(returning(0));

    let (mut first, mut second) = (1, 2);
    mock.read_multiple_data_and_return(&mut first, &mut second);

    let message = mock.take_failures()[0].to_string();
    assert!(message.starts_with("unmatched call: read_multiple_data_and_return((1, 2))"));
    assert!(message.contains("expects ((0, 0))"));
    assert!(mock.checkpoint().is_err());
}

#[test]
fn test_sequence_enforces_order() {
    let mock = MockDataAccess::new();
    let seq = Sequence::new();
    mock.expect_read_my_input()
        .will_once(set_arg_pointee(3))
        .in_sequence(&seq);
    mock.expect_write_my_input().with(eq(9)).in_sequence(&seq);

    ComponentA::new(&mock).calculate_square();
}

#[test]
fn test_sequence_restarts_after_checkpoint() {
    let mock = recording();
    let seq = Sequence::new();
    mock.expect_read_my_input()
        .will_once(set_arg_pointee(5))
        .in_sequence(&seq);
    // The read never happens, so the checkpoint fails and drops it
    assert!(mock.checkpoint().is_err());

    mock.expect_read_my_input()
        .will_once(set_arg_pointee(3))
        .in_sequence(&seq);
    mock.expect_write_my_input().with(eq(9)).in_sequence(&seq);
    ComponentA::new(&mock).calculate_square();

    assert!(mock.take_failures().is_empty());
    assert!(mock.verify().is_ok());
}

#[test]
fn test_recorded_failure_reports_failure_status() {
    let mock = recording();

    let err = try_read_some_data(&mock).unwrap_err();
    assert_eq!(err.status, MOCK_FAILURE_STATUS);
    let err = try_read_multiple_data(&mock).unwrap_err();
    assert_eq!(err.status, MOCK_FAILURE_STATUS);

    assert_eq!(mock.take_failures().len(), 2);
}

#[test]
#[should_panic(expected = "array action supplies 2 elements but the buffer holds 3")]
fn test_short_array_fails_the_test() {
    let mock = MockDataAccess::new();
    mock.expect_read_data_structure_array()
        .will_once(set_array_argument(vec![
            MyDataType::new(1, 'x'),
            MyDataType::new(2, 'y'),
        ]));

    let mut buffer = [MyDataType::default(); MY_DATA_ARRAY_SIZE];
    mock.read_data_structure_array(&mut buffer);
}

#[test]
fn test_release_on_panicking_test_body() {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mock = MockDataAccess::new();
        mock.expect_read_some_data().times(Times::Exactly(5));
        panic!("assertion failed in test body");
    }));

    // Only the body's panic surfaces; the mock stays quiet while unwinding
    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<&str>(),
        Some(&"assertion failed in test body")
    );
}

#[test]
fn test_operation_names_are_unique() {
    let mut names: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Operation::ALL.len());
}

proptest! {
    // A wildcard expectation accepts any argument and fires exactly once
    #[test]
    fn wildcard_accepts_anything(initial in any::<i32>(), written in any::<i32>()) {
        let mock = MockDataAccess::with_config(HarnessConfig::new().log_calls(false));
        mock.expect_read_some_data()
            .with(harness::any())
            .will_once(set_arg_pointee(written));

        let mut value = initial;
        mock.read_some_data(&mut value);
        prop_assert_eq!(value, written);
        prop_assert!(mock.verify().is_ok());
    }

    // A non-zero status never lets the written values through
    #[test]
    fn failure_status_hides_slots(
        status in any::<i32>().prop_filter("non-zero", |s| *s != 0),
        first in any::<i32>(),
        second in any::<i32>(),
    ) {
        let mock = MockDataAccess::with_config(HarnessConfig::new().log_calls(false));
        mock.expect_read_some_data_and_return()
            .will_once(set_arg_pointee(first).and_return(status));
        mock.expect_read_multiple_data_and_return()
            .will_once(set_arg_pointees(first, second).and_return(status));

        let component = ComponentA::new(&mock);
        prop_assert_eq!(component.check_read_some_data_and_return(), FAILURE_SENTINEL);
        prop_assert_eq!(component.check_read_multiple_data_and_return(), FAILURE_SENTINEL);
    }
}
