use crate::GeolocationError;
use crate::domain::RequestOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

/// Default options for one-shot requests and subscriptions.
///
/// Read from an optional file and from `GEOLOCATION_`-prefixed environment variables, using `__` between
/// nested keys, e.g. `GEOLOCATION_REQUEST__TIMEOUT=10s`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    request: RequestOptions,
    watch: RequestOptions,
}

impl GeolocationConfig {
    pub fn load(file_name: &str) -> Result<Self, GeolocationError> {
        GeolocationConfig::from_builder(
            Config::builder()
                .add_source(config::File::with_name(file_name).required(false))
                .add_source(environment()),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, GeolocationError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn request_options(&self) -> &RequestOptions {
        &self.request
    }

    pub fn watch_options(&self) -> &RequestOptions {
        &self.watch
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("GEOLOCATION").prefix_separator("_").separator("__")
}
