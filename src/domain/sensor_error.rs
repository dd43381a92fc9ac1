use thiserror::Error;

/// A failure reported by the location sensor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("timeout: {0}")]
    Timeout(String),
    /// The platform reported a code outside of its own contract.
    #[error("unrecognized error code {code}: {message}")]
    Unrecognized { code: u16, message: String },
    #[error(transparent)]
    Abandoned(#[from] Abandoned),
}

impl SensorError {
    pub fn message(&self) -> &str {
        match self {
            SensorError::PermissionDenied(message)
            | SensorError::PositionUnavailable(message)
            | SensorError::Timeout(message)
            | SensorError::Unrecognized { message, .. } => message,
            SensorError::Abandoned(_) => "",
        }
    }
}

/// Every resolver of a binding was dropped before it was resolved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the operation was dropped without being resolved")]
pub struct Abandoned;
