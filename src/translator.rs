//! Pure conversions between the platform payloads and the domain model.

use crate::domain::{Altitude, Movement, Reading, RequestOptions, SensorError};
use crate::extensions::duration_ext::PlatformMillis;
use crate::platform::{PlatformOptions, RawError, RawPosition, UNBOUNDED_TIMEOUT_MS};
use tracing::warn;

/// Altitude and movement are only filled in when the platform reports all of their fields.
pub fn to_reading(raw: RawPosition) -> Reading {
    let coords = raw.coords;

    let altitude = match (coords.altitude, coords.altitude_accuracy) {
        (Some(value), Some(accuracy)) => Some(Altitude { value, accuracy }),
        _ => None,
    };

    let movement = match (coords.heading, coords.speed) {
        (Some(_), Some(speed)) if speed == 0.0 => Some(Movement::Static),
        (Some(heading), Some(speed)) => Some(Movement::Moving {
            speed,
            degrees_from_north: heading,
        }),
        _ => None,
    };

    Reading {
        latitude: coords.latitude,
        longitude: coords.longitude,
        accuracy: coords.accuracy,
        altitude,
        movement,
        timestamp: raw.timestamp,
    }
}

pub fn to_sensor_error(raw: RawError) -> SensorError {
    match raw.code {
        1 => SensorError::PermissionDenied(raw.message),
        2 => SensorError::PositionUnavailable(raw.message),
        3 => SensorError::Timeout(raw.message),
        code => {
            warn!(code, "⚠️ Received unrecognized sensor error code {}: {}", code, raw.message);
            SensorError::Unrecognized { code, message: raw.message }
        }
    }
}

/// Only an absent timeout becomes unbounded, an explicit zero stays zero.
pub fn to_platform_options(options: &RequestOptions) -> PlatformOptions {
    PlatformOptions {
        enable_high_accuracy: options.enable_high_accuracy,
        // A finite timeout never turns into the unbounded sentinel
        timeout: options
            .timeout
            .map_or(UNBOUNDED_TIMEOUT_MS, |timeout| timeout.platform_millis().min(UNBOUNDED_TIMEOUT_MS - 1)),
        maximum_age: options.maximum_age.map_or(0, |maximum_age| maximum_age.platform_millis()),
    }
}

impl From<RawPosition> for Reading {
    fn from(raw: RawPosition) -> Self {
        to_reading(raw)
    }
}

impl From<RawError> for SensorError {
    fn from(raw: RawError) -> Self {
        to_sensor_error(raw)
    }
}
