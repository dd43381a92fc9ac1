//! The platform's callback-driven location sensor, specified only at its interface.

mod payload;

#[cfg(test)]
pub(crate) mod fake;

pub use payload::{PlatformOptions, RawCoordinates, RawError, RawPosition, UNBOUNDED_TIMEOUT_MS};

use std::fmt::{Debug, Display, Formatter};

pub type OnceSuccess = Box<dyn FnOnce(RawPosition) + Send>;
pub type OnceError = Box<dyn FnOnce(RawError) + Send>;
pub type WatchSuccess = Box<dyn Fn(RawPosition) + Send + Sync>;
pub type WatchError = Box<dyn Fn(RawError) + Send + Sync>;

/// Identifier the platform hands out for a continuous watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

impl Display for WatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location sensor that reports through callbacks.
///
/// Implementations must honour the following contract:
/// - `get_current_position` invokes at most one of its two callbacks, at most once.
/// - `watch_position` returns immediately and then invokes the callbacks zero or more times, in order, until the
///   watch is cleared.
/// - after `clear_watch` returns, no callback of that watch is invoked anymore.
pub trait PositionSource: Debug + Send + Sync {
    fn get_current_position(&self, on_success: OnceSuccess, on_error: OnceError, options: PlatformOptions);

    fn watch_position(&self, on_success: WatchSuccess, on_error: WatchError, options: PlatformOptions) -> WatchId;

    fn clear_watch(&self, watch_id: WatchId);
}
