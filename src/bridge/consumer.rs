use crate::domain::{Reading, SensorError};
use async_trait::async_trait;
use std::future::Future;

/// Receives the events of a subscription. Every event runs in its own detached task.
#[async_trait]
pub trait LocationConsumer: Send + Sync {
    async fn on_reading(&self, reading: Reading);

    async fn on_error(&self, error: SensorError);
}

/// Adapts a pair of closures to a [`LocationConsumer`].
pub(crate) struct Callbacks<R, E> {
    on_reading: R,
    on_error: E,
}

impl<R, E> Callbacks<R, E> {
    pub fn new(on_reading: R, on_error: E) -> Self {
        Callbacks { on_reading, on_error }
    }
}

#[async_trait]
impl<R, RF, E, EF> LocationConsumer for Callbacks<R, E>
where
    R: Fn(Reading) -> RF + Send + Sync + 'static,
    RF: Future<Output = ()> + Send + 'static,
    E: Fn(SensorError) -> EF + Send + Sync + 'static,
    EF: Future<Output = ()> + Send + 'static,
{
    async fn on_reading(&self, reading: Reading) {
        (self.on_reading)(reading).await
    }

    async fn on_error(&self, error: SensorError) {
        (self.on_error)(error).await
    }
}
