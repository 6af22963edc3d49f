use seamcheck::components::ComponentA;
use seamcheck::harness::{
    all_of, eq, invoke, pointee, set_arg_pointee, set_array_argument, MockDataAccess,
};
use seamcheck::{MyDataType, MY_DATA_ARRAY_SIZE};
use test_case::test_case;

use crate::test_helpers::sample_records;

#[test]
fn test_read_data_structure_matches_fields() {
    let mock = MockDataAccess::new();
    let mut input = MyDataType::new(13, 'a');

    mock.expect_read_data_structure().with(
        all_of::<MyDataType>()
            .field("a", |d: &MyDataType| d.a, eq(input.a))
            .field("b", |d: &MyDataType| d.b, eq(input.b)),
    );

    ComponentA::new(&mock).check_read_data_structure(&mut input);
}

#[test]
fn test_read_data_structure_array_fills_buffer() {
    let mock = MockDataAccess::new();
    mock.expect_read_data_structure_array()
        .will_once(set_array_argument(sample_records()));

    let mut result = [MyDataType::default(); MY_DATA_ARRAY_SIZE];
    ComponentA::new(&mock).check_read_data_structure_array(&mut result);

    assert_eq!(11, result[0].a);
    assert_eq!('a', result[0].b);
    assert_eq!(22, result[1].a);
    assert_eq!('b', result[1].b);
    assert_eq!(33, result[2].a);
    assert_eq!('c', result[2].b);
}

#[test]
fn test_read_data_structure_array_receives_caller_buffer() {
    let mock = MockDataAccess::new();
    let expected = sample_records();

    // Check element by element what the component handed over
    mock.expect_read_data_structure_array()
        .will_once(invoke(move |array: &[MyDataType; MY_DATA_ARRAY_SIZE]| {
            for (i, (want, got)) in expected.iter().zip(array.iter()).enumerate() {
                assert_eq!(want.a, got.a, "Check 'a' for index {}", i + 1);
                assert_eq!(want.b, got.b, "Check 'b' for index {}", i + 1);
            }
        }));

    let mut input = sample_records();
    ComponentA::new(&mock).check_read_data_structure_array(&mut input);
}

#[test_case(10, 100 ; "positive integer")]
#[test_case(-4, 16 ; "negative integer")]
#[test_case(0, 0 ; "square zero")]
fn test_calculate_square(input: i32, output: i32) {
    let mock = MockDataAccess::new();
    // Make read_my_input return the input
    mock.expect_read_my_input().will_once(set_arg_pointee(input));
    // Check that write_my_input was called with the square
    mock.expect_write_my_input().with(pointee(output));

    ComponentA::new(&mock).calculate_square();
}

#[test]
fn test_calculate_square_table_with_one_mock() {
    let mock = MockDataAccess::new();
    let component = ComponentA::new(&mock);

    for (description, input, output) in [
        ("positive integer", 10, 100),
        ("negative integer", -4, 16),
        ("square zero", 0, 0),
    ] {
        mock.expect_read_my_input().will_once(set_arg_pointee(input));
        mock.expect_write_my_input().with(pointee(output));
        component.calculate_square();
        assert!(mock.verify().is_ok(), "{}", description);
    }
}
