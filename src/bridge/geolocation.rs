use crate::GeolocationError;
use crate::bridge::consumer::Callbacks;
use crate::bridge::subscription::{self, Dispatch};
use crate::bridge::{LocationConsumer, LocationStream, SubscriptionHandle, WatchEvent};
use crate::domain::{Abandoned, Reading, RequestOptions, SensorError};
use crate::platform::{OnceError, OnceSuccess, PositionSource};
use crate::scheduler::{Binding, Cleanup, Spawner, TokioSpawner, binding};
use crate::translator::{to_platform_options, to_reading, to_sensor_error};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, instrument, warn};

/// Bridges a callback-driven [`PositionSource`] to futures and detached tasks.
///
/// Construct one per process and share it, it holds no global state.
#[derive(Debug)]
pub struct Geolocation {
    source: Arc<dyn PositionSource>,
    spawner: Arc<dyn Spawner>,
    next_subscription_id: AtomicU64,
}

impl Geolocation {
    pub fn new(source: Arc<dyn PositionSource>, spawner: Arc<dyn Spawner>) -> Self {
        Geolocation {
            source,
            spawner,
            next_subscription_id: AtomicU64::new(1),
        }
    }

    /// Spawns consumer tasks onto the tokio runtime this is called from.
    pub fn with_tokio(source: Arc<dyn PositionSource>) -> Result<Self, GeolocationError> {
        Ok(Geolocation::new(source, Arc::new(TokioSpawner::current()?)))
    }

    /// Asks the platform for the current position once. There is no retry and no cancellation, the request
    /// always runs to completion.
    #[instrument(skip(self))]
    pub async fn request_once(&self, options: &RequestOptions) -> Result<Reading, SensorError> {
        debug!("📍 Requesting current position...");

        let result = binding::<Reading, SensorError, _>(|resolver| {
            let on_success: OnceSuccess = {
                let resolver = resolver.clone();
                Box::new(move |raw| {
                    resolver.succeed(to_reading(raw));
                })
            };
            let on_error: OnceError = Box::new(move |raw| {
                resolver.fail(to_sensor_error(raw));
            });

            self.source.get_current_position(on_success, on_error, to_platform_options(options));
            None
        })
        .await;

        match &result {
            Ok(reading) => info!(timestamp = reading.timestamp, "📍 Requesting current position... OK"),
            Err(error) => warn!("📍 Requesting current position... failed, {}", error),
        }
        result
    }

    /// Subscribes to position updates. Every event spawns one task built by `on_reading` or `on_error`, in the
    /// order the platform reports them. Registration cannot fail, platform failures arrive as error events.
    pub async fn subscribe<R, RF, E, EF>(&self, options: &RequestOptions, on_reading: R, on_error: E) -> SubscriptionHandle
    where
        R: Fn(Reading) -> RF + Send + Sync + 'static,
        RF: Future<Output = ()> + Send + 'static,
        E: Fn(SensorError) -> EF + Send + Sync + 'static,
        EF: Future<Output = ()> + Send + 'static,
    {
        self.subscribe_consumer(options, Arc::new(Callbacks::new(on_reading, on_error))).await
    }

    #[instrument(skip(self, consumer))]
    pub async fn subscribe_consumer(&self, options: &RequestOptions, consumer: Arc<dyn LocationConsumer>) -> SubscriptionHandle {
        self.register(
            options,
            Dispatch::Spawn {
                consumer,
                spawner: self.spawner.clone(),
            },
        )
    }

    /// Subscribes to position updates, pushing every event into `mailbox` instead of spawning a task.
    #[instrument(skip(self, mailbox))]
    pub async fn subscribe_mailbox(&self, options: &RequestOptions, mailbox: UnboundedSender<WatchEvent>) -> SubscriptionHandle {
        self.register(options, Dispatch::Mailbox(mailbox))
    }

    /// Subscribes to position updates as a stream. Dropping the stream cancels the subscription.
    #[instrument(skip(self))]
    pub fn stream(&self, options: &RequestOptions) -> LocationStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.register(options, Dispatch::Mailbox(tx));
        LocationStream::new(UnboundedReceiverStream::new(rx), handle)
    }

    /// Watches the position until the returned future is dropped, spawning a task per event like
    /// [`Geolocation::subscribe`]. The future never resolves, dropping it cancels the subscription.
    ///
    /// The watch is registered right away, not on the first poll.
    pub fn watch<R, RF, E, EF>(&self, options: &RequestOptions, on_reading: R, on_error: E) -> Binding<Infallible, Abandoned>
    where
        R: Fn(Reading) -> RF + Send + Sync + 'static,
        RF: Future<Output = ()> + Send + 'static,
        E: Fn(SensorError) -> EF + Send + Sync + 'static,
        EF: Future<Output = ()> + Send + 'static,
    {
        binding(|resolver| {
            let handle = self.register(
                options,
                Dispatch::Spawn {
                    consumer: Arc::new(Callbacks::new(on_reading, on_error)),
                    spawner: self.spawner.clone(),
                },
            );

            let cleanup: Cleanup = Box::new(move || {
                handle.cancel();
                // Holding the resolver keeps the binding pending until it is dropped
                drop(resolver);
            });
            Some(cleanup)
        })
    }

    /// Cancels a subscription. Safe to call more than once; once this returns no further event of the
    /// subscription is delivered.
    #[instrument(skip_all, fields(subscription = handle.id()))]
    pub async fn unsubscribe(&self, handle: &SubscriptionHandle) {
        handle.cancel();
    }

    fn register(&self, options: &RequestOptions, dispatch: Dispatch) -> SubscriptionHandle {
        let id = self.next_subscription_id.fetch_add(1, Ordering::Relaxed);
        debug!(subscription = id, "📡 Subscribing to position updates...");

        let handle = subscription::register(&self.source, id, to_platform_options(options), dispatch);

        info!(subscription = id, "📡 Subscribing to position updates... OK");
        handle
    }
}
