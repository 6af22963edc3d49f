use std::cell::{Cell, RefCell};

use log::debug;

use super::{DataAccess, MyDataArray, MyDataType, Status, MY_DATA_ARRAY_SIZE, STATUS_OK};

/// In-memory data source used by the binary and as the non-mock side of
/// substitution tests
///
/// Like the hardware it stands in for, the `*_and_return` operations write
/// their slots even when they report a failure status. Callers must check
/// the status before trusting the slot.
#[derive(Debug)]
pub struct MemoryDataAccess {
    some_data: Cell<i32>,
    multiple_data: Cell<(i32, i32)>,
    status: Cell<Status>,
    record: Cell<MyDataType>,
    records: Cell<MyDataArray>,
    my_input: Cell<i32>,
    /// Every value passed to `write_my_input`, oldest first
    written: RefCell<Vec<i32>>,
}

impl MemoryDataAccess {
    /// Create a source holding zeroed values and an OK status
    pub fn new() -> Self {
        Self {
            some_data: Cell::new(0),
            multiple_data: Cell::new((0, 0)),
            status: Cell::new(STATUS_OK),
            record: Cell::new(MyDataType::default()),
            records: Cell::new([MyDataType::default(); MY_DATA_ARRAY_SIZE]),
            my_input: Cell::new(0),
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn set_some_data(&self, value: i32) {
        self.some_data.set(value);
    }

    pub fn set_multiple_data(&self, first: i32, second: i32) {
        self.multiple_data.set((first, second));
    }

    /// Status reported by every `*_and_return` operation
    pub fn set_status(&self, status: Status) {
        self.status.set(status);
    }

    pub fn set_record(&self, record: MyDataType) {
        self.record.set(record);
    }

    pub fn set_records(&self, records: MyDataArray) {
        self.records.set(records);
    }

    pub fn set_my_input(&self, value: i32) {
        self.my_input.set(value);
    }

    /// Values published through `write_my_input`
    pub fn written(&self) -> Vec<i32> {
        self.written.borrow().clone()
    }

    /// Last record handed in through `read_data_structure`
    pub fn record(&self) -> MyDataType {
        self.record.get()
    }

    /// Records currently held by the source
    pub fn records(&self) -> MyDataArray {
        self.records.get()
    }
}

impl Default for MemoryDataAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl DataAccess for MemoryDataAccess {
    fn read_some_data(&self, value: &mut i32) {
        *value = self.some_data.get();
        debug!("read_some_data -> {}", value);
    }

    fn read_some_data_and_return(&self, value: &mut i32) -> Status {
        *value = self.some_data.get();
        let status = self.status.get();
        debug!("read_some_data_and_return -> {} (status {})", value, status);
        status
    }

    fn read_multiple_data_and_return(&self, first: &mut i32, second: &mut i32) -> Status {
        (*first, *second) = self.multiple_data.get();
        let status = self.status.get();
        debug!(
            "read_multiple_data_and_return -> ({}, {}) (status {})",
            first, second, status
        );
        status
    }

    fn read_data_structure(&self, data: &mut MyDataType) {
        // The caller's record is exchanged with the stored one so both
        // directions of the transfer are observable.
        let incoming = *data;
        *data = self.record.replace(incoming);
        debug!("read_data_structure {} -> {}", incoming, data);
    }

    fn read_data_structure_array(&self, data: &mut MyDataArray) {
        *data = self.records.get();
        debug!("read_data_structure_array -> {} records", data.len());
    }

    fn read_my_input(&self, value: &mut i32) {
        *value = self.my_input.get();
        debug!("read_my_input -> {}", value);
    }

    fn write_my_input(&self, value: &i32) {
        debug!("write_my_input <- {}", value);
        self.written.borrow_mut().push(*value);
    }
}
