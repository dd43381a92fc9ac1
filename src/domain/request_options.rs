use serde::Deserialize;
use std::time::Duration;

/// Caller-supplied options for a single request or subscription.
///
/// A missing `timeout` means "wait as long as it takes", a missing `maximum_age` means "never reuse a cached
/// position". An explicit zero is kept as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub enable_high_accuracy: bool,
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub maximum_age: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        RequestOptions::default()
    }

    pub fn high_accuracy(mut self, enable: bool) -> Self {
        self.enable_high_accuracy = enable;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn maximum_age(mut self, maximum_age: Duration) -> Self {
        self.maximum_age = Some(maximum_age);
        self
    }
}
