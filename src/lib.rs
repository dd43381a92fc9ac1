//! Structured async access to a callback-driven location sensor.
//!
//! A [`Geolocation`] wraps a platform [`PositionSource`] and exposes a one-shot
//! [`request_once`](Geolocation::request_once), continuous subscriptions that spawn a task per event, and an explicit,
//! idempotent [`unsubscribe`](Geolocation::unsubscribe). Raw platform payloads are translated into [`Reading`] and
//! [`SensorError`] by the [`translator`].

pub mod app_config;
pub mod bridge;
pub mod domain;
mod error;
pub mod extensions;
pub mod platform;
pub mod scheduler;
pub mod translator;

pub use bridge::{Geolocation, LocationConsumer, LocationStream, SubscriptionHandle, WatchEvent};
pub use domain::{Abandoned, Altitude, Movement, Reading, RequestOptions, SensorError};
pub use error::GeolocationError;
pub use platform::PositionSource;
