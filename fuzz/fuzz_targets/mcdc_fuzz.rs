#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use seamcheck::coverage::{analyze, Decision};

#[derive(Arbitrary, Debug)]
enum Node {
    Condition(u8),
    Not(Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

#[derive(Arbitrary, Debug)]
struct McdcFuzzInput {
    decision: Node,
    vectors: Vec<Vec<bool>>,
}

// Map the fuzzed tree onto at most 8 conditions
fn to_decision(node: &Node) -> Decision {
    match node {
        Node::Condition(index) => Decision::condition(usize::from(index % 8)),
        Node::Not(inner) => to_decision(inner).negate(),
        Node::And(lhs, rhs) => to_decision(lhs).and(to_decision(rhs)),
        Node::Or(lhs, rhs) => to_decision(lhs).or(to_decision(rhs)),
    }
}

fuzz_target!(|input: McdcFuzzInput| {
    let decision = to_decision(&input.decision);

    // Short vectors are an error, never a panic
    let report = match analyze(&decision, &input.vectors) {
        Ok(report) => report,
        Err(_) => return,
    };

    // Every reported pair really flips the outcome
    for coverage in &report.conditions {
        for &(a, b) in &coverage.pairs {
            assert_ne!(report.evaluations[a].outcome, report.evaluations[b].outcome);
        }
    }
});
