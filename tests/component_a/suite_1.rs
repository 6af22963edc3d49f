use seamcheck::components::{ComponentA, FAILURE_SENTINEL};
use seamcheck::harness::{any, pointee, set_arg_pointee, set_arg_pointees, MockDataAccess};

#[test]
fn test_read_some_data_returns_slot() {
    let mock = MockDataAccess::new();
    mock.expect_read_some_data()
        .with(any())
        .will_once(set_arg_pointee(13));

    assert_eq!(ComponentA::new(&mock).check_read_some_data(), 13);
}

#[test]
fn test_write_some_data_passes_value_through_slot() {
    let mock = MockDataAccess::new();
    // The slot handed to read_some_data must already hold 13
    mock.expect_read_some_data().with(pointee(13));

    ComponentA::new(&mock).check_write_some_data(13);
}

#[test]
fn test_read_some_data_and_return_honours_status() {
    seamcheck::init_test_logging();
    let mock = MockDataAccess::new();
    let component = ComponentA::new(&mock);

    // Slot is used because the status is zero
    mock.expect_read_some_data_and_return()
        .will_once(set_arg_pointee(13).and_return(0));
    assert_eq!(component.check_read_some_data_and_return(), 13);

    // Slot is ignored because the status is non-zero
    mock.expect_read_some_data_and_return()
        .will_once(set_arg_pointee(13).and_return(1));
    assert_eq!(component.check_read_some_data_and_return(), FAILURE_SENTINEL);
}

#[test]
fn test_read_multiple_data_and_return_honours_status() {
    let mock = MockDataAccess::new();
    let component = ComponentA::new(&mock);

    // Both slots are used because the status is zero
    mock.expect_read_multiple_data_and_return()
        .with((any(), any()))
        .will_once(set_arg_pointees(5, 8).and_return(0));
    assert_eq!(component.check_read_multiple_data_and_return(), 13);

    // Neither slot is used because the status is non-zero
    mock.expect_read_multiple_data_and_return()
        .will_once(set_arg_pointees(5, 8).and_return(1));
    assert_eq!(
        component.check_read_multiple_data_and_return(),
        FAILURE_SENTINEL
    );
}
