use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single translated sensor sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters.
    pub accuracy: f64,
    pub altitude: Option<Altitude>,
    pub movement: Option<Movement>,
    /// Capture time in epoch milliseconds, as reported by the platform.
    pub timestamp: i64,
}

impl Reading {
    /// Returns the capture time, or `None` if the platform timestamp is out of range.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Altitude {
    pub value: f64, // In meters
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Movement {
    Static,
    #[serde(rename_all = "camelCase")]
    Moving { speed: f64, degrees_from_north: f64 },
}
