//! The same component code runs unchanged against three implementations
//! of the seam: the in-memory source, the harness mock and a mock generated
//! by mockall.

use mockall::mock;
use mockall::predicate;
use seamcheck::components::{ComponentA, FAILURE_SENTINEL};
use seamcheck::harness::{set_arg_pointee, set_arg_pointees, MockDataAccess};
use seamcheck::seam::MyDataArray;
use seamcheck::{DataAccess, MemoryDataAccess, MyDataType, Status};

mock! {
    pub Source {}

    impl DataAccess for Source {
        fn read_some_data(&self, value: &mut i32);
        fn read_some_data_and_return(&self, value: &mut i32) -> Status;
        fn read_multiple_data_and_return(&self, first: &mut i32, second: &mut i32) -> Status;
        fn read_data_structure(&self, data: &mut MyDataType);
        fn read_data_structure_array(&self, data: &mut MyDataArray);
        fn read_my_input(&self, value: &mut i32);
        fn write_my_input(&self, value: &i32);
    }
}

/// Business logic written once against the trait
fn sum_then_square<D: DataAccess>(component: &ComponentA<D>) -> i32 {
    let sum = component.check_read_multiple_data_and_return();
    component.calculate_square();
    sum
}

#[test]
fn test_memory_source() {
    seamcheck::init_test_logging();
    let source = MemoryDataAccess::new();
    source.set_multiple_data(5, 8);
    source.set_my_input(3);

    assert_eq!(sum_then_square(&ComponentA::new(&source)), 13);
    assert_eq!(source.written(), vec![9]);
}

#[test]
fn test_harness_mock() {
    let mock = MockDataAccess::new();
    mock.expect_read_multiple_data_and_return()
        .will_once(set_arg_pointees(5, 8).and_return(0));
    mock.expect_read_my_input().will_once(set_arg_pointee(3));
    mock.expect_write_my_input().with(seamcheck::harness::eq(9));

    assert_eq!(sum_then_square(&ComponentA::new(&mock)), 13);
}

#[test]
fn test_mockall_mock() {
    let mut mock = MockSource::new();
    mock.expect_read_multiple_data_and_return()
        .times(1)
        .returning(|first, second| {
            *first = 5;
            *second = 8;
            0
        });
    mock.expect_read_my_input()
        .times(1)
        .returning(|value| *value = 3);
    mock.expect_write_my_input()
        .with(predicate::eq(9))
        .times(1)
        .return_const(());

    assert_eq!(sum_then_square(&ComponentA::new(&mock)), 13);
}

#[test]
fn test_mockall_failure_status() {
    let mut mock = MockSource::new();
    mock.expect_read_some_data_and_return()
        .times(1)
        .returning(|value| {
            *value = 13;
            1
        });

    assert_eq!(
        ComponentA::new(&mock).check_read_some_data_and_return(),
        FAILURE_SENTINEL
    );
}
