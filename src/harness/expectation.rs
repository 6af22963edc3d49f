//! Expectation records, cardinalities, sequences and the per-operation queue
//! that matches calls against them.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::panic::Location;
use std::rc::Rc;

use super::action::Action;
use super::error::HarnessError;
use super::matcher::{Any, Matcher};
use super::Operation;

/// How many times an expectation must be called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
    /// Inclusive range
    Between(usize, usize),
    AnyNumber,
}

impl Times {
    pub fn min(&self) -> usize {
        match *self {
            Self::Exactly(n) | Self::AtLeast(n) | Self::Between(n, _) => n,
            Self::AtMost(_) | Self::AnyNumber => 0,
        }
    }

    pub fn max(&self) -> Option<usize> {
        match *self {
            Self::Exactly(n) | Self::AtMost(n) | Self::Between(_, n) => Some(n),
            Self::AtLeast(_) | Self::AnyNumber => None,
        }
    }

    /// Lower bound reached
    pub fn is_satisfied_by(&self, calls: usize) -> bool {
        calls >= self.min()
    }

    /// Upper bound reached; further calls cannot match
    pub fn is_saturated_by(&self, calls: usize) -> bool {
        self.max().is_some_and(|max| calls >= max)
    }
}

fn count(n: usize) -> String {
    match n {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{} times", n),
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exactly(0) => write!(f, "never"),
            Self::Exactly(n) => write!(f, "exactly {}", count(n)),
            Self::AtLeast(n) => write!(f, "at least {}", count(n)),
            Self::AtMost(n) => write!(f, "at most {}", count(n)),
            Self::Between(lo, hi) => write!(f, "between {} and {} times", lo, hi),
            Self::AnyNumber => write!(f, "any number of times"),
        }
    }
}

/// Call bookkeeping shared between an expectation and the sequence it
/// belongs to
#[derive(Debug)]
pub(crate) struct CallState {
    label: String,
    calls: Cell<usize>,
    times: Cell<Times>,
    retired: Cell<bool>,
}

impl CallState {
    fn is_satisfied(&self) -> bool {
        self.times.get().is_satisfied_by(self.calls.get())
    }
}

/// Ordering constraint across expectations, possibly on different operations
///
/// An expectation added to a sequence can only match once every earlier
/// member is satisfied. Matching it retires the earlier members.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    members: Rc<RefCell<Vec<Rc<CallState>>>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, state: Rc<CallState>) -> usize {
        let mut members = self.members.borrow_mut();
        members.push(state);
        members.len() - 1
    }

    /// First earlier member that still needs calls
    fn pending_before(&self, position: usize) -> Option<String> {
        self.members.borrow()[..position]
            .iter()
            .find(|m| !m.retired.get() && !m.is_satisfied())
            .map(|m| m.label.clone())
    }

    fn retire_before(&self, position: usize) {
        for member in &self.members.borrow()[..position] {
            member.retired.set(true);
        }
    }
}

/// One `expect_*` rule
pub(crate) struct Expectation<A, R> {
    matcher: Box<dyn Matcher<A>>,
    explicit_times: Option<Times>,
    once: VecDeque<Action<A, R>>,
    repeatedly: Option<Action<A, R>>,
    sequence: Option<(Sequence, usize)>,
    state: Rc<CallState>,
}

impl<A, R: Default> Expectation<A, R> {
    fn new(label: String) -> Self {
        Self {
            matcher: Box::new(Any),
            explicit_times: None,
            once: VecDeque::new(),
            repeatedly: None,
            sequence: None,
            state: Rc::new(CallState {
                label,
                calls: Cell::new(0),
                times: Cell::new(Times::Exactly(1)),
                retired: Cell::new(false),
            }),
        }
    }

    /// Recompute the cardinality after the rule changed. Without an explicit
    /// `times`, `n` one-shot actions mean exactly `n` calls, or at least `n`
    /// when a repeating action follows them.
    fn refresh_times(&self) {
        let inferred = match (self.once.len(), self.repeatedly.is_some()) {
            (0, false) => Times::Exactly(1),
            (n, false) => Times::Exactly(n),
            (n, true) => Times::AtLeast(n),
        };
        self.state.times.set(self.explicit_times.unwrap_or(inferred));
    }

    fn fire(&mut self, args: &mut A) -> Result<R, super::error::ActionError> {
        self.state.calls.set(self.state.calls.get() + 1);
        if let Some(mut action) = self.once.pop_front() {
            return action.perform(args);
        }
        match self.repeatedly.as_mut() {
            Some(action) => action.perform(args),
            None => Ok(R::default()),
        }
    }
}

/// One `on_call_*` rule
pub(crate) struct DefaultRule<A, R> {
    matcher: Box<dyn Matcher<A>>,
    action: Option<Action<A, R>>,
}

/// Expectations and standing defaults registered for one operation
pub(crate) struct OperationQueue<A, R> {
    operation: Operation,
    expectations: Vec<Expectation<A, R>>,
    defaults: Vec<DefaultRule<A, R>>,
}

impl<A: Debug, R: Default> OperationQueue<A, R> {
    pub(crate) fn new(operation: Operation) -> Self {
        Self {
            operation,
            expectations: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// Match a call against the registered rules and run the chosen action.
    ///
    /// Expectations are tried in declaration order. When none accepts the
    /// call the most recently declared matching default applies.
    pub(crate) fn dispatch(&mut self, args: &mut A) -> Result<R, HarnessError> {
        let operation = self.operation;
        let mut reasons = Vec::new();
        let mut out_of_order = None;

        for expectation in &mut self.expectations {
            let state = &expectation.state;
            if state.retired.get() {
                reasons.push(format!(
                    "{} was retired by a later call in its sequence",
                    state.label
                ));
                continue;
            }
            let times = state.times.get();
            if times.is_saturated_by(state.calls.get()) {
                reasons.push(format!("{} is already saturated ({})", state.label, times));
                continue;
            }
            if !expectation.matcher.matches(args) {
                reasons.push(format!(
                    "{} expects ({})",
                    state.label,
                    expectation.matcher.describe()
                ));
                continue;
            }
            if let Some((sequence, position)) = &expectation.sequence {
                if let Some(pending) = sequence.pending_before(*position) {
                    reasons.push(format!("{} must wait for {}", state.label, pending));
                    out_of_order.get_or_insert((state.label.clone(), pending));
                    continue;
                }
                sequence.retire_before(*position);
            }
            return expectation
                .fire(args)
                .map_err(|source| HarnessError::Action { operation, source });
        }

        // Most recently declared default wins
        for rule in self.defaults.iter_mut().rev() {
            if !rule.matcher.matches(args) {
                continue;
            }
            return match rule.action.as_mut() {
                Some(action) => action
                    .perform(args)
                    .map_err(|source| HarnessError::Action { operation, source }),
                None => Ok(R::default()),
            };
        }

        let arguments = format!("{:?}", args);
        Err(match out_of_order {
            Some((expectation, pending)) => HarnessError::OutOfSequence {
                operation,
                expectation,
                pending,
            },
            None if self.expectations.is_empty() => HarnessError::UnexpectedCall {
                operation,
                arguments,
            },
            None => HarnessError::UnmatchedCall {
                operation,
                arguments,
                reasons,
            },
        })
    }
}

/// Type-erased view used for verification across all operations
pub(crate) trait QueueState {
    fn unsatisfied(&self) -> Vec<HarnessError>;
    fn clear(&self);
}

impl<A, R> QueueState for RefCell<OperationQueue<A, R>> {
    fn unsatisfied(&self) -> Vec<HarnessError> {
        let queue = self.borrow();
        queue
            .expectations
            .iter()
            .map(|e| &e.state)
            .filter(|state| !state.is_satisfied())
            .map(|state| HarnessError::Unsatisfied {
                operation: queue.operation,
                expectation: state.label.clone(),
                expected: state.times.get().to_string(),
                actual: state.calls.get(),
            })
            .collect()
    }

    fn clear(&self) {
        let mut queue = self.borrow_mut();
        // Sequences outlive the queue and must not wait on removed members
        for expectation in &queue.expectations {
            expectation.state.retired.set(true);
        }
        queue.expectations.clear();
        queue.defaults.clear();
    }
}

/// Builder returned by `expect_*`; the expectation is live as soon as it is
/// created and every method refines it in place
pub struct ExpectationBuilder<'a, A, R> {
    queue: &'a RefCell<OperationQueue<A, R>>,
    index: usize,
}

impl<'a, A: 'static, R: Default + 'static> ExpectationBuilder<'a, A, R> {
    pub(crate) fn register(
        queue: &'a RefCell<OperationQueue<A, R>>,
        location: &Location<'_>,
    ) -> Self {
        let mut q = queue.borrow_mut();
        let label = format!(
            "{} expectation #{} ({}:{})",
            q.operation,
            q.expectations.len() + 1,
            location.file(),
            location.line()
        );
        q.expectations.push(Expectation::new(label));
        let index = q.expectations.len() - 1;
        drop(q);
        Self { queue, index }
    }

    fn update(self, f: impl FnOnce(&mut Expectation<A, R>)) -> Self {
        {
            let mut queue = self.queue.borrow_mut();
            let expectation = &mut queue.expectations[self.index];
            f(expectation);
            expectation.refresh_times();
        }
        self
    }

    /// Only accept calls whose arguments satisfy `matcher`
    pub fn with(self, matcher: impl Matcher<A> + 'static) -> Self {
        self.update(|e| e.matcher = Box::new(matcher))
    }

    /// Override the inferred cardinality
    pub fn times(self, times: Times) -> Self {
        self.update(|e| e.explicit_times = Some(times))
    }

    /// Queue an action for the next call
    pub fn will_once(self, action: Action<A, R>) -> Self {
        self.update(|e| e.once.push_back(action))
    }

    /// Action for every call once the one-shot actions are used up
    pub fn will_repeatedly(self, action: Action<A, R>) -> Self {
        self.update(|e| e.repeatedly = Some(action))
    }

    pub fn in_sequence(self, sequence: &Sequence) -> Self {
        self.update(|e| {
            let position = sequence.push(Rc::clone(&e.state));
            e.sequence = Some((sequence.clone(), position));
        })
    }
}

/// Builder returned by `on_call_*`
pub struct DefaultBuilder<'a, A, R> {
    queue: &'a RefCell<OperationQueue<A, R>>,
    index: usize,
}

impl<'a, A: 'static, R: 'static> DefaultBuilder<'a, A, R> {
    pub(crate) fn register(queue: &'a RefCell<OperationQueue<A, R>>) -> Self {
        let mut q = queue.borrow_mut();
        q.defaults.push(DefaultRule {
            matcher: Box::new(Any),
            action: None,
        });
        let index = q.defaults.len() - 1;
        drop(q);
        Self { queue, index }
    }

    pub fn with(self, matcher: impl Matcher<A> + 'static) -> Self {
        self.queue.borrow_mut().defaults[self.index].matcher = Box::new(matcher);
        self
    }

    pub fn will_by_default(self, action: Action<A, R>) -> Self {
        self.queue.borrow_mut().defaults[self.index].action = Some(action);
        self
    }
}
