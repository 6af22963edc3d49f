//! Actions run by the mock when an expectation fires
//!
//! An `Action<A, R>` receives the call's arguments as `&mut A`. Whatever it
//! leaves in `A` is written back into the caller's output slots, and its
//! result becomes the operation's return value.

use std::fmt::{self, Debug};

use super::error::ActionError;

type ActionFn<A, R> = Box<dyn FnMut(&mut A) -> Result<R, ActionError>>;

/// Effect executed when an expectation or default rule fires
pub struct Action<A, R> {
    description: String,
    run: ActionFn<A, R>,
}

impl<A, R> Action<A, R> {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn perform(&mut self, args: &mut A) -> Result<R, ActionError> {
        (self.run)(args)
    }
}

impl<A: 'static, R: 'static> Action<A, R> {
    /// Wrap an arbitrary closure that may modify the arguments
    pub fn new<F>(description: impl Into<String>, mut f: F) -> Self
    where
        F: FnMut(&mut A) -> R + 'static,
    {
        Self {
            description: description.into(),
            run: Box::new(move |args: &mut A| Ok(f(args))),
        }
    }

    /// Run `self` for its writes, then `next` for its writes and result
    pub fn then<R2: 'static>(self, next: Action<A, R2>) -> Action<A, R2> {
        let mut first = self.run;
        let mut second = next.run;
        Action {
            description: format!("{}, then {}", self.description, next.description),
            run: Box::new(move |args: &mut A| {
                first(args)?;
                second(args)
            }),
        }
    }
}

impl<A: 'static> Action<A, ()> {
    /// Keep the writes of `self` and return a fixed value
    pub fn and_return<R: Clone + Debug + 'static>(self, value: R) -> Action<A, R> {
        self.then(returning(value))
    }
}

impl<A, R> Debug for Action<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Return a fixed value without touching the arguments
pub fn returning<A: 'static, R: Clone + Debug + 'static>(value: R) -> Action<A, R> {
    Action {
        description: format!("return {:?}", value),
        run: Box::new(move |_: &mut A| Ok(value.clone())),
    }
}

/// Write `value` into the (single) output slot
pub fn set_arg_pointee<T: Clone + Debug + 'static>(value: T) -> Action<T, ()> {
    Action {
        description: format!("set output to {:?}", value),
        run: Box::new(move |slot: &mut T| {
            *slot = value.clone();
            Ok(())
        }),
    }
}

/// Write `first` and `second` into a pair of output slots
pub fn set_arg_pointees<A, B>(first: A, second: B) -> Action<(A, B), ()>
where
    A: Clone + Debug + 'static,
    B: Clone + Debug + 'static,
{
    Action {
        description: format!("set outputs to ({:?}, {:?})", first, second),
        run: Box::new(move |slots: &mut (A, B)| {
            slots.0 = first.clone();
            slots.1 = second.clone();
            Ok(())
        }),
    }
}

/// Copy `values` into a fixed-size output buffer
///
/// The length is checked when the action runs; a mismatch writes nothing and
/// fails with [`ActionError::ArrayLength`].
pub fn set_array_argument<T, const N: usize>(values: impl Into<Vec<T>>) -> Action<[T; N], ()>
where
    T: Clone + Debug + 'static,
{
    let values = values.into();
    Action {
        description: format!("set array to {:?}", values),
        run: Box::new(move |buffer: &mut [T; N]| {
            if values.len() != N {
                return Err(ActionError::ArrayLength {
                    expected: N,
                    actual: values.len(),
                });
            }
            buffer.clone_from_slice(&values);
            Ok(())
        }),
    }
}

/// Hand the received arguments to a callback without modifying them
///
/// This is where element-by-element verification of an input buffer goes.
pub fn invoke<A: 'static, R: 'static, F>(mut f: F) -> Action<A, R>
where
    F: FnMut(&A) -> R + 'static,
{
    Action {
        description: "invoke callback".to_string(),
        run: Box::new(move |args: &mut A| Ok(f(&*args))),
    }
}
