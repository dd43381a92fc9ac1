use config::ConfigError;
use thiserror::Error;
use tokio::runtime::TryCurrentError;

/// Failures while setting up the bridge. Sensor failures are reported as [`crate::SensorError`] instead.
#[derive(Error, Debug)]
pub enum GeolocationError {
    #[error("no tokio runtime to spawn consumer tasks on: {0}")]
    NoRuntime(#[from] TryCurrentError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
