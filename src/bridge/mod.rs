mod consumer;
mod geolocation;
mod stream;
mod subscription;

pub use consumer::LocationConsumer;
pub use geolocation::Geolocation;
pub use stream::LocationStream;
pub use subscription::{SubscriptionHandle, WatchEvent};
