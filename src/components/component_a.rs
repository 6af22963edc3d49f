use log::debug;

use crate::seam::{try_read_multiple_data, try_read_some_data, DataAccess, MyDataArray, MyDataType};

/// Value returned by the status-checking wrappers when the source reports a
/// failure
pub const FAILURE_SENTINEL: i32 = 0;

/// Small wrappers around the data-access seam
///
/// `ComponentA` only ever sees the [`DataAccess`] it was built with, so a
/// test can hand it `&MockDataAccess` and production code a real source.
#[derive(Debug)]
pub struct ComponentA<D> {
    source: D,
}

impl<D: DataAccess> ComponentA<D> {
    pub fn new(source: D) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn into_source(self) -> D {
        self.source
    }

    /// Return whatever the source puts in the slot.
    pub fn check_read_some_data(&self) -> i32 {
        let mut value = 0;
        self.source.read_some_data(&mut value);
        value
    }

    /// Hand `value` to the source through the slot of `read_some_data`.
    pub fn check_write_some_data(&self, value: i32) {
        let mut slot = value;
        self.source.read_some_data(&mut slot);
    }

    /// The slot value when the status is OK, [`FAILURE_SENTINEL`] otherwise.
    pub fn check_read_some_data_and_return(&self) -> i32 {
        match try_read_some_data(&self.source) {
            Ok(value) => value,
            Err(err) => {
                debug!("{}", err);
                FAILURE_SENTINEL
            }
        }
    }

    /// Sum of both slots when the status is OK, [`FAILURE_SENTINEL`]
    /// otherwise. The sum saturates at the `i32` bounds.
    pub fn check_read_multiple_data_and_return(&self) -> i32 {
        match try_read_multiple_data(&self.source) {
            Ok((first, second)) => first.saturating_add(second),
            Err(err) => {
                debug!("{}", err);
                FAILURE_SENTINEL
            }
        }
    }

    /// Pass a record straight through to the source.
    pub fn check_read_data_structure(&self, data: &mut MyDataType) {
        self.source.read_data_structure(data);
    }

    /// Pass a buffer straight through to the source.
    pub fn check_read_data_structure_array(&self, data: &mut MyDataArray) {
        self.source.read_data_structure_array(data);
    }

    /// Read the input, publish its square. Saturates at `i32::MAX`.
    pub fn calculate_square(&self) {
        let mut input = 0;
        self.source.read_my_input(&mut input);
        let square = input.saturating_mul(input);
        debug!("calculate_square: {}^2 = {}", input, square);
        self.source.write_my_input(&square);
    }
}
