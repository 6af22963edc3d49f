//! Argument matchers
//!
//! A matcher is evaluated against a snapshot of the call's arguments. For
//! by-reference parameters the snapshot holds the value the reference points
//! to at the moment of the call, before any action writes to it.

use std::fmt::Debug;
use std::marker::PhantomData;

/// Predicate over the arguments of one call
pub trait Matcher<T: ?Sized> {
    fn matches(&self, actual: &T) -> bool;

    /// Human-readable form used in failure messages
    fn describe(&self) -> String;
}

/// Wildcard, accepts anything
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

pub fn any() -> Any {
    Any
}

impl<T: ?Sized> Matcher<T> for Any {
    fn matches(&self, _actual: &T) -> bool {
        true
    }

    fn describe(&self) -> String {
        "_".to_string()
    }
}

/// Exact equality
#[derive(Debug, Clone)]
pub struct Equals<T>(T);

pub fn eq<T: PartialEq + Debug>(expected: T) -> Equals<T> {
    Equals(expected)
}

impl<T: PartialEq + Debug> Matcher<T> for Equals<T> {
    fn matches(&self, actual: &T) -> bool {
        *actual == self.0
    }

    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }
}

/// Equality on the value behind a by-reference argument
///
/// Used when the code under test hands a pre-filled slot to an operation
/// whose parameter is nominally an output.
#[derive(Debug, Clone)]
pub struct Pointee<T>(T);

pub fn pointee<T: PartialEq + Debug>(expected: T) -> Pointee<T> {
    Pointee(expected)
}

impl<T: PartialEq + Debug> Matcher<T> for Pointee<T> {
    fn matches(&self, actual: &T) -> bool {
        *actual == self.0
    }

    fn describe(&self) -> String {
        format!("points to {:?}", self.0)
    }
}

/// Applies a matcher to one field of a composite argument
pub struct Field<T, F, G, M> {
    name: &'static str,
    getter: G,
    matcher: M,
    _marker: PhantomData<fn(&T) -> F>,
}

pub fn field<T, F, G, M>(name: &'static str, getter: G, matcher: M) -> Field<T, F, G, M>
where
    G: Fn(&T) -> F,
    M: Matcher<F>,
{
    Field {
        name,
        getter,
        matcher,
        _marker: PhantomData,
    }
}

impl<T, F, G, M> Matcher<T> for Field<T, F, G, M>
where
    G: Fn(&T) -> F,
    M: Matcher<F>,
{
    fn matches(&self, actual: &T) -> bool {
        self.matcher.matches(&(self.getter)(actual))
    }

    fn describe(&self) -> String {
        format!(".{} is {}", self.name, self.matcher.describe())
    }
}

/// Conjunction of matchers; empty accepts everything
pub struct AllOf<T> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

pub fn all_of<T>() -> AllOf<T> {
    AllOf {
        matchers: Vec::new(),
    }
}

impl<T: 'static> AllOf<T> {
    /// Require another matcher to hold
    pub fn and(mut self, matcher: impl Matcher<T> + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Shorthand for `and(field(name, getter, matcher))`
    pub fn field<F: 'static, G, M>(self, name: &'static str, getter: G, matcher: M) -> Self
    where
        G: Fn(&T) -> F + 'static,
        M: Matcher<F> + 'static,
    {
        self.and(field(name, getter, matcher))
    }
}

impl<T> Matcher<T> for AllOf<T> {
    fn matches(&self, actual: &T) -> bool {
        self.matchers.iter().all(|m| m.matches(actual))
    }

    fn describe(&self) -> String {
        if self.matchers.is_empty() {
            return "_".to_string();
        }
        let parts: Vec<String> = self.matchers.iter().map(|m| m.describe()).collect();
        format!("all of ({})", parts.join(", "))
    }
}

/// Negation
#[derive(Debug, Clone)]
pub struct Not<M>(M);

pub fn not<M>(matcher: M) -> Not<M> {
    Not(matcher)
}

impl<T, M: Matcher<T>> Matcher<T> for Not<M> {
    fn matches(&self, actual: &T) -> bool {
        !self.0.matches(actual)
    }

    fn describe(&self) -> String {
        format!("not {}", self.0.describe())
    }
}

/// Arbitrary callback
pub struct Predicate<F> {
    description: String,
    check: F,
}

pub fn predicate<T, F>(description: impl Into<String>, check: F) -> Predicate<F>
where
    F: Fn(&T) -> bool,
{
    Predicate {
        description: description.into(),
        check,
    }
}

impl<T, F: Fn(&T) -> bool> Matcher<T> for Predicate<F> {
    fn matches(&self, actual: &T) -> bool {
        (self.check)(actual)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Element-wise equality for fixed-size array arguments
#[derive(Debug, Clone)]
pub struct ElementsAre<T>(Vec<T>);

pub fn elements_are<T: PartialEq + Debug>(expected: impl Into<Vec<T>>) -> ElementsAre<T> {
    ElementsAre(expected.into())
}

impl<T: PartialEq + Debug, const N: usize> Matcher<[T; N]> for ElementsAre<T> {
    fn matches(&self, actual: &[T; N]) -> bool {
        self.0.len() == N && self.0.iter().zip(actual.iter()).all(|(e, a)| e == a)
    }

    fn describe(&self) -> String {
        format!("elements are {:?}", self.0)
    }
}

impl<A, B, MA, MB> Matcher<(A, B)> for (MA, MB)
where
    MA: Matcher<A>,
    MB: Matcher<B>,
{
    fn matches(&self, actual: &(A, B)) -> bool {
        self.0.matches(&actual.0) && self.1.matches(&actual.1)
    }

    fn describe(&self) -> String {
        format!("({}, {})", self.0.describe(), self.1.describe())
    }
}
