#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use seamcheck::harness::{eq, set_arg_pointee, FailurePolicy, HarnessConfig, MockDataAccess};
use seamcheck::DataAccess;

#[derive(Arbitrary, Debug)]
struct MatcherFuzzInput {
    // Values the expectations wait for
    expected: Vec<i32>,
    // Values the calls arrive with
    calls: Vec<i32>,
}

fuzz_target!(|input: MatcherFuzzInput| {
    let config = HarnessConfig::new()
        .failure_policy(FailurePolicy::Record)
        .log_calls(false);
    let mock = MockDataAccess::with_config(config);

    for value in &input.expected {
        mock.expect_read_some_data()
            .with(eq(*value))
            .will_once(set_arg_pointee(value.wrapping_add(1)));
    }

    for value in &input.calls {
        let mut slot = *value;
        mock.read_some_data(&mut slot);
    }

    // Whatever happened is reported, never raised
    let _ = mock.checkpoint();
});
