use std::fmt;

use log::debug;

use super::{Decision, Evaluation, McdcError};

/// Coverage of one condition: every pair of test vectors (by index) that
/// shows the condition independently changing the outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionCoverage {
    pub condition: usize,
    pub pairs: Vec<(usize, usize)>,
}

impl ConditionCoverage {
    pub fn is_covered(&self) -> bool {
        !self.pairs.is_empty()
    }
}

/// MC/DC analysis of a decision against a set of test vectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McdcReport {
    pub vectors: Vec<Vec<bool>>,
    pub evaluations: Vec<Evaluation>,
    pub conditions: Vec<ConditionCoverage>,
}

impl McdcReport {
    /// Every condition has at least one independence pair
    pub fn is_covered(&self) -> bool {
        self.conditions.iter().all(ConditionCoverage::is_covered)
    }

    pub fn uncovered(&self) -> Vec<usize> {
        self.conditions
            .iter()
            .filter(|c| !c.is_covered())
            .map(|c| c.condition)
            .collect()
    }

    /// `(covered, total)` condition counts
    pub fn ratio(&self) -> (usize, usize) {
        let covered = self.conditions.iter().filter(|c| c.is_covered()).count();
        (covered, self.conditions.len())
    }
}

impl fmt::Display for McdcReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vector, eval) in self.vectors.iter().zip(&self.evaluations) {
            writeln!(f, "{} -> {}", format_trace(vector, eval), eval.outcome)?;
        }
        for coverage in &self.conditions {
            match coverage.pairs.first() {
                Some((a, b)) => writeln!(
                    f,
                    "c{}: covered by {} and {}",
                    coverage.condition,
                    format_vector(&self.vectors[*a]),
                    format_vector(&self.vectors[*b])
                )?,
                None => writeln!(f, "c{}: not covered", coverage.condition)?,
            }
        }
        let (covered, total) = self.ratio();
        write!(f, "MC/DC {}/{} conditions", covered, total)
    }
}

/// `T`/`F` per value, e.g. `FTF`
pub fn format_vector(vector: &[bool]) -> String {
    vector.iter().map(|&v| if v { 'T' } else { 'F' }).collect()
}

/// Like [`format_vector`], with `-` for conditions short-circuiting skipped
fn format_trace(vector: &[bool], eval: &Evaluation) -> String {
    vector
        .iter()
        .enumerate()
        .map(|(i, &v)| match eval.evaluated.get(i).copied().flatten() {
            Some(_) if v => 'T',
            Some(_) => 'F',
            None => '-',
        })
        .collect()
}

/// Parse a `T`/`F` string (case-insensitive, `1`/`0` also accepted)
pub fn parse_vector(text: &str) -> Result<Vec<bool>, McdcError> {
    text.chars()
        .map(|c| match c {
            'T' | 't' | '1' => Ok(true),
            'F' | 'f' | '0' => Ok(false),
            _ => Err(McdcError::InvalidVector(text.to_string())),
        })
        .collect()
}

/// Whether evaluations `a` and `b` form an independence pair for
/// `condition`: both evaluated it with different values, the outcomes
/// differ, and no other condition evaluated by both differs.
fn is_independence_pair(a: &Evaluation, b: &Evaluation, condition: usize) -> bool {
    let differs_here = matches!(
        (a.evaluated[condition], b.evaluated[condition]),
        (Some(x), Some(y)) if x != y
    );
    if !differs_here || a.outcome == b.outcome {
        return false;
    }
    a.evaluated
        .iter()
        .zip(&b.evaluated)
        .enumerate()
        .filter(|&(i, _)| i != condition)
        .all(|(_, pair)| match pair {
            (Some(x), Some(y)) => x == y,
            _ => true,
        })
}

/// Evaluate `decision` on every vector and look for independence pairs.
///
/// This is unique-cause MC/DC: apart from the condition under test, every
/// condition evaluated in both vectors must hold the same value. Conditions
/// short-circuiting skipped count as "don't care".
pub fn analyze(decision: &Decision, vectors: &[Vec<bool>]) -> Result<McdcReport, McdcError> {
    let evaluations = vectors
        .iter()
        .map(|v| decision.evaluate(v))
        .collect::<Result<Vec<_>, _>>()?;

    let conditions = decision
        .conditions()
        .into_iter()
        .map(|condition| {
            let mut pairs = Vec::new();
            for i in 0..evaluations.len() {
                for j in (i + 1)..evaluations.len() {
                    if is_independence_pair(&evaluations[i], &evaluations[j], condition) {
                        pairs.push((i, j));
                    }
                }
            }
            ConditionCoverage { condition, pairs }
        })
        .collect::<Vec<_>>();

    let report = McdcReport {
        vectors: vectors.to_vec(),
        evaluations,
        conditions,
    };
    let (covered, total) = report.ratio();
    debug!(
        "MC/DC for {}: {}/{} conditions covered",
        decision, covered, total
    );
    Ok(report)
}
