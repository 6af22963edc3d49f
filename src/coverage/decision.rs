use std::collections::BTreeSet;
use std::fmt;

use super::McdcError;

/// Boolean decision over numbered conditions, evaluated left to right with
/// short-circuiting like `&&` and `||`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Condition(usize),
    Not(Box<Decision>),
    And(Box<Decision>, Box<Decision>),
    Or(Box<Decision>, Box<Decision>),
}

/// Result of evaluating a decision on one test vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: bool,
    /// Value of each condition, `None` where short-circuiting skipped it
    pub evaluated: Vec<Option<bool>>,
}

impl Decision {
    pub fn condition(index: usize) -> Self {
        Self::Condition(index)
    }

    pub fn and(self, rhs: Decision) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Decision) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Number of inputs a test vector must supply
    pub fn condition_count(&self) -> usize {
        match self {
            Self::Condition(index) => index + 1,
            Self::Not(inner) => inner.condition_count(),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.condition_count().max(rhs.condition_count())
            }
        }
    }

    /// Indices that occur in the decision, ascending
    pub fn conditions(&self) -> Vec<usize> {
        let mut indices = BTreeSet::new();
        self.collect_conditions(&mut indices);
        indices.into_iter().collect()
    }

    fn collect_conditions(&self, indices: &mut BTreeSet<usize>) {
        match self {
            Self::Condition(index) => {
                indices.insert(*index);
            }
            Self::Not(inner) => inner.collect_conditions(indices),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_conditions(indices);
                rhs.collect_conditions(indices);
            }
        }
    }

    pub fn evaluate(&self, inputs: &[bool]) -> Result<Evaluation, McdcError> {
        let needed = self.condition_count();
        if inputs.len() < needed {
            return Err(McdcError::VectorTooShort {
                needed,
                actual: inputs.len(),
            });
        }
        let mut evaluated = vec![None; needed];
        let outcome = self.eval(inputs, &mut evaluated);
        Ok(Evaluation { outcome, evaluated })
    }

    fn eval(&self, inputs: &[bool], evaluated: &mut [Option<bool>]) -> bool {
        match self {
            Self::Condition(index) => {
                evaluated[*index] = Some(inputs[*index]);
                inputs[*index]
            }
            Self::Not(inner) => !inner.eval(inputs, evaluated),
            Self::And(lhs, rhs) => lhs.eval(inputs, evaluated) && rhs.eval(inputs, evaluated),
            Self::Or(lhs, rhs) => lhs.eval(inputs, evaluated) || rhs.eval(inputs, evaluated),
        }
    }

    /// Render with caller-supplied condition names, falling back to `cN`
    pub fn render(&self, names: &[&str]) -> String {
        match self {
            Self::Condition(index) => names
                .get(*index)
                .map_or_else(|| format!("c{}", index), |name| (*name).to_string()),
            Self::Not(inner) => format!("!{}", inner.render_operand(names)),
            Self::And(lhs, rhs) => format!(
                "{} && {}",
                lhs.render_operand(names),
                rhs.render_operand(names)
            ),
            Self::Or(lhs, rhs) => format!(
                "{} || {}",
                lhs.render_operand(names),
                rhs.render_operand(names)
            ),
        }
    }

    fn render_operand(&self, names: &[&str]) -> String {
        match self {
            Self::Condition(_) | Self::Not(_) => self.render(names),
            _ => format!("({})", self.render(names)),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}
