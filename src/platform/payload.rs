use serde::{Deserialize, Deserializer, Serialize};

/// Timeout value the platform reads as "no timeout at all".
pub const UNBOUNDED_TIMEOUT_MS: u64 = u64::MAX;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPosition {
    pub coords: RawCoordinates,
    /// Epoch milliseconds. Fractional values some platforms report are truncated.
    #[serde(deserialize_with = "epoch_millis")]
    pub timestamp: i64,
}

fn epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = f64::deserialize(deserializer)?;
    if !millis.is_finite() {
        return Err(serde::de::Error::custom(format!("invalid timestamp: {}", millis)));
    }
    Ok(millis.trunc() as i64)
}

impl RawPosition {
    pub fn from_json(s: &str) -> Result<RawPosition, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Coordinates as the platform reports them. A `null` and a missing field both end up as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub altitude_accuracy: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawError {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl RawError {
    pub fn from_json(s: &str) -> Result<RawError, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOptions {
    pub enable_high_accuracy: bool,
    pub timeout: u64,
    pub maximum_age: u64,
}
