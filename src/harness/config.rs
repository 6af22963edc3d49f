/// What the mock does when a call cannot be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Panic inside the seam call, failing the current test immediately
    #[default]
    Panic,
    /// Record the failure and report it at verification. The seam call
    /// writes nothing and returns `MOCK_FAILURE_STATUS` where it has a status
    Record,
}

/// Per-mock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    pub failure_policy: FailurePolicy,
    /// Log every dispatched call at debug level
    pub log_calls: bool,
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self {
            failure_policy: FailurePolicy::Panic,
            log_calls: true,
        }
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn log_calls(mut self, enabled: bool) -> Self {
        self.log_calls = enabled;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new()
    }
}
