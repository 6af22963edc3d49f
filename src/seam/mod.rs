//! Data-access seam
//!
//! Business components never touch a data source directly. They call the
//! operations of [`DataAccess`], and whoever constructs the component decides
//! which implementation sits behind it: [`MemoryDataAccess`] in the binary, a
//! [`crate::harness::MockDataAccess`] in tests.

pub mod memory;

use std::fmt;
use thiserror::Error;

pub use memory::MemoryDataAccess;

/// Status code returned by the `*_and_return` operations
pub type Status = i32;

/// The only status that makes output slots valid
pub const STATUS_OK: Status = 0;

/// Number of records moved by [`DataAccess::read_data_structure_array`]
pub const MY_DATA_ARRAY_SIZE: usize = 3;

/// Two-field record exchanged across the seam
///
/// Field order is part of the contract: field-wise matchers address `a`
/// then `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MyDataType {
    pub a: i32,
    pub b: char,
}

impl MyDataType {
    pub const fn new(a: i32, b: char) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for MyDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{a: {}, b: {:?}}}", self.a, self.b)
    }
}

/// Fixed-size buffer of records
pub type MyDataArray = [MyDataType; MY_DATA_ARRAY_SIZE];

/// Primitive data-access operations available to business code
///
/// Output parameters follow the source convention: the callee writes into a
/// caller-owned slot. For the `*_and_return` operations the slots are only
/// meaningful when the returned status is [`STATUS_OK`].
pub trait DataAccess {
    /// Write one integer into `value`.
    fn read_some_data(&self, value: &mut i32);

    /// Write one integer into `value` and report whether it is valid.
    fn read_some_data_and_return(&self, value: &mut i32) -> Status;

    /// Write two independent integers; both are valid iff the status is OK.
    fn read_multiple_data_and_return(&self, first: &mut i32, second: &mut i32) -> Status;

    /// Overwrite a whole record.
    fn read_data_structure(&self, data: &mut MyDataType);

    /// Fill exactly [`MY_DATA_ARRAY_SIZE`] records.
    fn read_data_structure_array(&self, data: &mut MyDataArray);

    /// Read the input of the square calculation.
    fn read_my_input(&self, value: &mut i32);

    /// Publish a computed value.
    fn write_my_input(&self, value: &i32);
}

impl<T: DataAccess + ?Sized> DataAccess for &T {
    fn read_some_data(&self, value: &mut i32) {
        (**self).read_some_data(value);
    }

    fn read_some_data_and_return(&self, value: &mut i32) -> Status {
        (**self).read_some_data_and_return(value)
    }

    fn read_multiple_data_and_return(&self, first: &mut i32, second: &mut i32) -> Status {
        (**self).read_multiple_data_and_return(first, second)
    }

    fn read_data_structure(&self, data: &mut MyDataType) {
        (**self).read_data_structure(data);
    }

    fn read_data_structure_array(&self, data: &mut MyDataArray) {
        (**self).read_data_structure_array(data);
    }

    fn read_my_input(&self, value: &mut i32) {
        (**self).read_my_input(value);
    }

    fn write_my_input(&self, value: &i32) {
        (**self).write_my_input(value);
    }
}

impl<T: DataAccess + ?Sized> DataAccess for Box<T> {
    fn read_some_data(&self, value: &mut i32) {
        (**self).read_some_data(value);
    }

    fn read_some_data_and_return(&self, value: &mut i32) -> Status {
        (**self).read_some_data_and_return(value)
    }

    fn read_multiple_data_and_return(&self, first: &mut i32, second: &mut i32) -> Status {
        (**self).read_multiple_data_and_return(first, second)
    }

    fn read_data_structure(&self, data: &mut MyDataType) {
        (**self).read_data_structure(data);
    }

    fn read_data_structure_array(&self, data: &mut MyDataArray) {
        (**self).read_data_structure_array(data);
    }

    fn read_my_input(&self, value: &mut i32) {
        (**self).read_my_input(value);
    }

    fn write_my_input(&self, value: &i32) {
        (**self).write_my_input(value);
    }
}

/// A `*_and_return` operation reported a non-zero status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operation} failed with status {status}")]
pub struct StatusError {
    pub operation: &'static str,
    pub status: Status,
}

/// Read one integer, discarding the slot unless the status is OK.
pub fn try_read_some_data<D: DataAccess + ?Sized>(source: &D) -> Result<i32, StatusError> {
    let mut value = 0;
    match source.read_some_data_and_return(&mut value) {
        STATUS_OK => Ok(value),
        status => Err(StatusError {
            operation: "read_some_data_and_return",
            status,
        }),
    }
}

/// Read two integers, discarding both slots unless the status is OK.
pub fn try_read_multiple_data<D: DataAccess + ?Sized>(
    source: &D,
) -> Result<(i32, i32), StatusError> {
    let mut first = 0;
    let mut second = 0;
    match source.read_multiple_data_and_return(&mut first, &mut second) {
        STATUS_OK => Ok((first, second)),
        status => Err(StatusError {
            operation: "read_multiple_data_and_return",
            status,
        }),
    }
}
