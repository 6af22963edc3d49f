use proptest::prelude::*;
use seamcheck::components::{check_abort, check_abort_decision, CHECK_ABORT_MCDC_VECTORS};
use seamcheck::coverage::analyze;
use test_case::test_case;

#[test_case(false, false, false, false ; "nothing set")]
#[test_case(false, true, false, false ; "commanded but invalid")]
#[test_case(false, true, true, true ; "valid abort command")]
#[test_case(true, false, false, true ; "off course")]
fn test_check_abort(off_course: bool, commanded: bool, valid: bool, expected: bool) {
    assert_eq!(check_abort(off_course, commanded, valid), expected);
}

fn canonical_vectors() -> Vec<Vec<bool>> {
    CHECK_ABORT_MCDC_VECTORS.iter().map(|v| v.to_vec()).collect()
}

#[test]
fn test_canonical_vectors_reach_mcdc() {
    let report = analyze(&check_abort_decision(), &canonical_vectors()).unwrap();
    assert!(report.is_covered(), "{}", report);
    assert_eq!(report.ratio(), (3, 3));
}

#[test]
fn test_every_canonical_vector_is_needed() {
    let decision = check_abort_decision();
    for skip in 0..CHECK_ABORT_MCDC_VECTORS.len() {
        let mut vectors = canonical_vectors();
        vectors.remove(skip);
        let report = analyze(&decision, &vectors).unwrap();
        assert!(!report.is_covered(), "still covered without vector {}", skip);
    }
}

#[test]
fn test_exhaustive_vectors_reach_mcdc() {
    let vectors: Vec<Vec<bool>> = (0..8u8)
        .map(|bits| vec![bits & 4 != 0, bits & 2 != 0, bits & 1 != 0])
        .collect();
    let report = analyze(&check_abort_decision(), &vectors).unwrap();
    assert!(report.is_covered());
}

fn extra_vectors() -> impl Strategy<Value = Vec<Vec<bool>>> {
    proptest::collection::vec(proptest::collection::vec(any::<bool>(), 3), 0..6)
}

proptest! {
    // The analysed decision and the function agree on every input
    #[test]
    fn decision_agrees_with_function(a in any::<bool>(), b in any::<bool>(), c in any::<bool>()) {
        let eval = check_abort_decision().evaluate(&[a, b, c]).unwrap();
        prop_assert_eq!(eval.outcome, check_abort(a, b, c));
    }

    // Adding vectors never loses coverage
    #[test]
    fn coverage_is_monotonic(extra in extra_vectors()) {
        let mut vectors = canonical_vectors();
        vectors.extend(extra);
        let report = analyze(&check_abort_decision(), &vectors).unwrap();
        prop_assert!(report.is_covered());
    }
}
