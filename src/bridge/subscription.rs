use crate::bridge::LocationConsumer;
use crate::domain::{Reading, SensorError};
use crate::platform::{PlatformOptions, PositionSource, WatchError, WatchId, WatchSuccess};
use crate::scheduler::Spawner;
use crate::translator::{to_reading, to_sensor_error};
use futures::future::BoxFuture;
use std::fmt::{Debug, Formatter};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, trace, warn};

/// One translated event of a continuous subscription.
pub type WatchEvent = Result<Reading, SensorError>;

/// Where the events of a subscription go.
pub(crate) enum Dispatch {
    /// Spawns a detached task per event.
    Spawn {
        consumer: Arc<dyn LocationConsumer>,
        spawner: Arc<dyn Spawner>,
    },
    /// Pushes every event into the mailbox of a running task.
    Mailbox(UnboundedSender<WatchEvent>),
}

impl Dispatch {
    fn deliver(&self, subscription_id: u64, event: WatchEvent) {
        match self {
            Dispatch::Spawn { consumer, spawner } => {
                let consumer = consumer.clone();
                let task: BoxFuture<'static, ()> = match event {
                    Ok(reading) => Box::pin(async move { consumer.on_reading(reading).await }),
                    Err(error) => Box::pin(async move { consumer.on_error(error).await }),
                };
                spawner.spawn(task);
            }
            Dispatch::Mailbox(mailbox) => {
                if mailbox.send(event).is_err() {
                    warn!(subscription = subscription_id, "⚠️ Mailbox of subscription {} is closed, dropping event", subscription_id);
                }
            }
        }
    }
}

impl Debug for Dispatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Spawn { spawner, .. } => f.debug_struct("Spawn").field("spawner", spawner).finish_non_exhaustive(),
            Dispatch::Mailbox(_) => f.write_str("Mailbox"),
        }
    }
}

#[derive(Debug)]
enum State {
    Registering(Dispatch),
    Active { watch_id: WatchId, dispatch: Dispatch },
    Cancelled,
}

#[derive(Debug)]
struct Shared {
    id: u64,
    state: Mutex<State>,
}

impl Shared {
    // The state is a plain enum that is only ever replaced as a whole, a poisoned lock still holds a valid value
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dispatches while holding the lock, so that nothing gets through once `cancel` flipped the state.
    fn deliver(&self, event: WatchEvent) {
        let state = self.lock();
        match &*state {
            State::Registering(dispatch) | State::Active { dispatch, .. } => {
                trace!(subscription = self.id, "Delivering {:?}", event);
                dispatch.deliver(self.id, event);
            }
            State::Cancelled => {
                debug!(subscription = self.id, "Dropping an event for cancelled subscription {}", self.id);
            }
        }
    }

    fn activate(&self, watch_id: WatchId) {
        let mut state = self.lock();
        *state = match mem::replace(&mut *state, State::Cancelled) {
            State::Registering(dispatch) => State::Active { watch_id, dispatch },
            other => other,
        };
    }
}

/// Registers a platform watch whose events are translated and handed to `dispatch`.
pub(crate) fn register(source: &Arc<dyn PositionSource>, id: u64, options: PlatformOptions, dispatch: Dispatch) -> SubscriptionHandle {
    let shared = Arc::new(Shared {
        id,
        state: Mutex::new(State::Registering(dispatch)),
    });

    let on_success: WatchSuccess = {
        let shared = shared.clone();
        Box::new(move |raw| shared.deliver(Ok(to_reading(raw))))
    };
    let on_error: WatchError = {
        let shared = shared.clone();
        Box::new(move |raw| shared.deliver(Err(to_sensor_error(raw))))
    };

    // Callbacks may fire before this returns, the lock must not be held here
    let watch_id = source.watch_position(on_success, on_error, options);
    shared.activate(watch_id);

    SubscriptionHandle {
        shared,
        source: source.clone(),
    }
}

/// Owns the platform watch of one subscription. Cancelling it is the only way to release the watch.
///
/// Dropping a handle does not cancel the subscription.
#[must_use = "dropping the handle leaves the watch registered, call unsubscribe"]
pub struct SubscriptionHandle {
    shared: Arc<Shared>,
    source: Arc<dyn PositionSource>,
}

impl SubscriptionHandle {
    pub fn id(&self) -> u64 {
        self.shared.id
    }

    pub fn is_active(&self) -> bool {
        !matches!(*self.shared.lock(), State::Cancelled)
    }

    /// Cancels the subscription and clears its platform watch. Returns `false` if it was already cancelled.
    ///
    /// No event is delivered anymore once this returns, not even one the platform had in flight.
    pub fn cancel(&self) -> bool {
        let previous = mem::replace(&mut *self.shared.lock(), State::Cancelled);
        match previous {
            State::Active { watch_id, dispatch } => {
                debug!(subscription = self.shared.id, watch_id = %watch_id, "🛑 Cancelling subscription {}...", self.shared.id);
                drop(dispatch);
                self.source.clear_watch(watch_id);
                info!(subscription = self.shared.id, watch_id = %watch_id, "🛑 Cancelling subscription {}... OK", self.shared.id);
                true
            }
            State::Registering(_) | State::Cancelled => {
                debug!(subscription = self.shared.id, "🛑 Subscription {} is already cancelled", self.shared.id);
                false
            }
        }
    }
}

impl Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.shared.id)
            .field("active", &self.is_active())
            .finish()
    }
}
