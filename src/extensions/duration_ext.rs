use std::time::Duration;

/// Converts a duration to the whole milliseconds the platform expects.
pub trait PlatformMillis {
    /// Returns the duration in milliseconds, saturating at `u64::MAX`. Sub-millisecond remainders are dropped.
    fn platform_millis(&self) -> u64;
}

impl PlatformMillis for Duration {
    fn platform_millis(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }
}
