mod reading;
mod request_options;
mod sensor_error;

pub use reading::{Altitude, Movement, Reading};
pub use request_options::RequestOptions;
pub use sensor_error::{Abandoned, SensorError};
