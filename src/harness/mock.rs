use std::cell::RefCell;
use std::fmt::Debug;
use std::panic::Location;
use std::thread;

use log::{debug, warn};

use super::config::{FailurePolicy, HarnessConfig};
use super::error::{HarnessError, VerifyError};
use super::expectation::{DefaultBuilder, ExpectationBuilder, OperationQueue, QueueState};
use super::Operation;
use crate::seam::{DataAccess, MyDataArray, MyDataType, Status};

/// Status a recording mock returns from a `*_and_return` call it could not
/// serve, so the caller takes its failure path
pub const MOCK_FAILURE_STATUS: Status = -1;

/// One intercepted call, in the order calls arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub operation: Operation,
    /// Debug rendering of the arguments as they arrived
    pub arguments: String,
}

/// Programmable fake implementation of [`DataAccess`]
///
/// Create one per test. Expectations are declared with the `expect_*`
/// methods, standing defaults with the `on_call_*` methods. When the mock is
/// dropped every expectation must have reached its minimum call count,
/// otherwise the test fails; nothing is checked if the test is already
/// panicking.
///
/// ```
/// use seamcheck::components::ComponentA;
/// use seamcheck::harness::{set_arg_pointee, MockDataAccess};
///
/// let mock = MockDataAccess::new();
/// mock.expect_read_some_data_and_return()
///     .will_once(set_arg_pointee(13).and_return(0));
///
/// assert_eq!(ComponentA::new(&mock).check_read_some_data_and_return(), 13);
/// ```
pub struct MockDataAccess {
    config: HarnessConfig,
    read_some_data: RefCell<OperationQueue<i32, ()>>,
    read_some_data_and_return: RefCell<OperationQueue<i32, Status>>,
    read_multiple_data_and_return: RefCell<OperationQueue<(i32, i32), Status>>,
    read_data_structure: RefCell<OperationQueue<MyDataType, ()>>,
    read_data_structure_array: RefCell<OperationQueue<MyDataArray, ()>>,
    read_my_input: RefCell<OperationQueue<i32, ()>>,
    write_my_input: RefCell<OperationQueue<i32, ()>>,
    calls: RefCell<Vec<CallRecord>>,
    failures: RefCell<Vec<HarnessError>>,
}

impl MockDataAccess {
    pub fn new() -> Self {
        Self::with_config(HarnessConfig::default())
    }

    pub fn with_config(config: HarnessConfig) -> Self {
        Self {
            config,
            read_some_data: RefCell::new(OperationQueue::new(Operation::ReadSomeData)),
            read_some_data_and_return: RefCell::new(OperationQueue::new(
                Operation::ReadSomeDataAndReturn,
            )),
            read_multiple_data_and_return: RefCell::new(OperationQueue::new(
                Operation::ReadMultipleDataAndReturn,
            )),
            read_data_structure: RefCell::new(OperationQueue::new(Operation::ReadDataStructure)),
            read_data_structure_array: RefCell::new(OperationQueue::new(
                Operation::ReadDataStructureArray,
            )),
            read_my_input: RefCell::new(OperationQueue::new(Operation::ReadMyInput)),
            write_my_input: RefCell::new(OperationQueue::new(Operation::WriteMyInput)),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    #[track_caller]
    pub fn expect_read_some_data(&self) -> ExpectationBuilder<'_, i32, ()> {
        ExpectationBuilder::register(&self.read_some_data, Location::caller())
    }

    #[track_caller]
    pub fn expect_read_some_data_and_return(&self) -> ExpectationBuilder<'_, i32, Status> {
        ExpectationBuilder::register(&self.read_some_data_and_return, Location::caller())
    }

    #[track_caller]
    pub fn expect_read_multiple_data_and_return(
        &self,
    ) -> ExpectationBuilder<'_, (i32, i32), Status> {
        ExpectationBuilder::register(&self.read_multiple_data_and_return, Location::caller())
    }

    #[track_caller]
    pub fn expect_read_data_structure(&self) -> ExpectationBuilder<'_, MyDataType, ()> {
        ExpectationBuilder::register(&self.read_data_structure, Location::caller())
    }

    #[track_caller]
    pub fn expect_read_data_structure_array(&self) -> ExpectationBuilder<'_, MyDataArray, ()> {
        ExpectationBuilder::register(&self.read_data_structure_array, Location::caller())
    }

    #[track_caller]
    pub fn expect_read_my_input(&self) -> ExpectationBuilder<'_, i32, ()> {
        ExpectationBuilder::register(&self.read_my_input, Location::caller())
    }

    #[track_caller]
    pub fn expect_write_my_input(&self) -> ExpectationBuilder<'_, i32, ()> {
        ExpectationBuilder::register(&self.write_my_input, Location::caller())
    }

    pub fn on_call_read_some_data(&self) -> DefaultBuilder<'_, i32, ()> {
        DefaultBuilder::register(&self.read_some_data)
    }

    pub fn on_call_read_some_data_and_return(&self) -> DefaultBuilder<'_, i32, Status> {
        DefaultBuilder::register(&self.read_some_data_and_return)
    }

    pub fn on_call_read_multiple_data_and_return(&self) -> DefaultBuilder<'_, (i32, i32), Status> {
        DefaultBuilder::register(&self.read_multiple_data_and_return)
    }

    pub fn on_call_read_data_structure(&self) -> DefaultBuilder<'_, MyDataType, ()> {
        DefaultBuilder::register(&self.read_data_structure)
    }

    pub fn on_call_read_data_structure_array(&self) -> DefaultBuilder<'_, MyDataArray, ()> {
        DefaultBuilder::register(&self.read_data_structure_array)
    }

    pub fn on_call_read_my_input(&self) -> DefaultBuilder<'_, i32, ()> {
        DefaultBuilder::register(&self.read_my_input)
    }

    pub fn on_call_write_my_input(&self) -> DefaultBuilder<'_, i32, ()> {
        DefaultBuilder::register(&self.write_my_input)
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Remove and return the failures recorded under [`FailurePolicy::Record`]
    pub fn take_failures(&self) -> Vec<HarnessError> {
        self.failures.borrow_mut().drain(..).collect()
    }

    /// Report recorded failures and unsatisfied expectations without
    /// changing any state
    pub fn verify(&self) -> Result<(), VerifyError> {
        let mut failures = self.failures.borrow().clone();
        for queue in self.queues() {
            failures.extend(queue.unsatisfied());
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(VerifyError { failures })
        }
    }

    /// Verify, then forget all expectations, defaults and recorded failures
    /// so the rest of the test starts from a clean mock
    pub fn checkpoint(&self) -> Result<(), VerifyError> {
        let result = self.verify();
        for queue in self.queues() {
            queue.clear();
        }
        self.failures.borrow_mut().clear();
        result
    }

    fn queues(&self) -> [&dyn QueueState; 7] {
        [
            &self.read_some_data,
            &self.read_some_data_and_return,
            &self.read_multiple_data_and_return,
            &self.read_data_structure,
            &self.read_data_structure_array,
            &self.read_my_input,
            &self.write_my_input,
        ]
    }

    /// Log the call, match it and run the action on a copy of the
    /// arguments. Returns the updated arguments and the result, or `None`
    /// when the call failed.
    fn call<A, R>(
        &self,
        queue: &RefCell<OperationQueue<A, R>>,
        operation: Operation,
        args: &A,
    ) -> Option<(A, R)>
    where
        A: Clone + Debug,
        R: Default,
    {
        let arguments = format!("{:?}", args);
        if self.config.log_calls {
            debug!("mock call {}({})", operation, arguments);
        }
        self.calls.borrow_mut().push(CallRecord {
            operation,
            arguments,
        });

        let mut args = args.clone();
        let result = queue.borrow_mut().dispatch(&mut args);
        match result {
            Ok(value) => Some((args, value)),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn fail(&self, err: HarnessError) {
        warn!("{}", err);
        match self.config.failure_policy {
            FailurePolicy::Panic => panic!("{}", err),
            FailurePolicy::Record => self.failures.borrow_mut().push(err),
        }
    }
}

impl Default for MockDataAccess {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MockDataAccess {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        if let Err(err) = self.verify() {
            panic!("{}", err);
        }
    }
}

impl DataAccess for MockDataAccess {
    fn read_some_data(&self, value: &mut i32) {
        if let Some((out, ())) = self.call(&self.read_some_data, Operation::ReadSomeData, &*value) {
            *value = out;
        }
    }

    fn read_some_data_and_return(&self, value: &mut i32) -> Status {
        match self.call(
            &self.read_some_data_and_return,
            Operation::ReadSomeDataAndReturn,
            &*value,
        ) {
            Some((out, status)) => {
                *value = out;
                status
            }
            None => MOCK_FAILURE_STATUS,
        }
    }

    fn read_multiple_data_and_return(&self, first: &mut i32, second: &mut i32) -> Status {
        match self.call(
            &self.read_multiple_data_and_return,
            Operation::ReadMultipleDataAndReturn,
            &(*first, *second),
        ) {
            Some(((a, b), status)) => {
                *first = a;
                *second = b;
                status
            }
            None => MOCK_FAILURE_STATUS,
        }
    }

    fn read_data_structure(&self, data: &mut MyDataType) {
        if let Some((out, ())) = self.call(
            &self.read_data_structure,
            Operation::ReadDataStructure,
            &*data,
        ) {
            *data = out;
        }
    }

    fn read_data_structure_array(&self, data: &mut MyDataArray) {
        if let Some((out, ())) = self.call(
            &self.read_data_structure_array,
            Operation::ReadDataStructureArray,
            &*data,
        ) {
            *data = out;
        }
    }

    fn read_my_input(&self, value: &mut i32) {
        if let Some((out, ())) = self.call(&self.read_my_input, Operation::ReadMyInput, &*value) {
            *value = out;
        }
    }

    fn write_my_input(&self, value: &i32) {
        self.call(&self.write_my_input, Operation::WriteMyInput, value);
    }
}
