use crate::domain::Abandoned;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, ready};
use tokio::sync::oneshot;
use tracing::{trace, warn};

/// Runs when a binding is dropped before it settled.
pub type Cleanup = Box<dyn FnOnce() + Send>;

type Slot<T, E> = Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>;

/// Turns a callback-style operation into a future.
///
/// `register` starts the operation right away and hands its callbacks a [`Resolver`]. It may return a cleanup
/// that is run once if the binding is dropped before it settled. Once every resolver is dropped without one of
/// them resolving, the binding fails with [`Abandoned`].
pub fn binding<T, E, F>(register: F) -> Binding<T, E>
where
    F: FnOnce(Resolver<T, E>) -> Option<Cleanup>,
{
    let (tx, rx) = oneshot::channel();
    let resolver = Resolver {
        slot: Arc::new(Mutex::new(Some(tx))),
    };
    let cleanup = register(resolver);

    Binding { rx, cleanup }
}

/// Settles a [`Binding`]. Clones share one slot, the first resolution wins.
pub struct Resolver<T, E> {
    slot: Slot<T, E>,
}

impl<T, E> Resolver<T, E> {
    pub fn succeed(&self, value: T) -> bool {
        self.resolve(Ok(value))
    }

    pub fn fail(&self, error: E) -> bool {
        self.resolve(Err(error))
    }

    /// Returns `false` if the binding was already resolved or is no longer awaited.
    pub fn resolve(&self, result: Result<T, E>) -> bool {
        let sender = self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        match sender {
            Some(sender) => sender.send(result).is_ok(),
            None => {
                warn!("⚠️ Ignoring a second resolution of an already resolved binding");
                false
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).is_none()
    }
}

impl<T, E> Clone for Resolver<T, E> {
    fn clone(&self) -> Self {
        Resolver { slot: self.slot.clone() }
    }
}

#[must_use = "a binding runs its cleanup as soon as it is dropped"]
pub struct Binding<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
    cleanup: Option<Cleanup>,
}

impl<T, E> Future for Binding<T, E>
where
    E: From<Abandoned>,
{
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = ready!(Pin::new(&mut self.rx).poll(cx));
        // Settled, the cleanup must not run anymore
        self.cleanup = None;

        Poll::Ready(result.unwrap_or_else(|_| Err(E::from(Abandoned))))
    }
}

impl<T, E> Drop for Binding<T, E> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            trace!("Running cleanup of an unsettled binding");
            cleanup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SensorError;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use test_log::test;
    use tokio::time::timeout;

    fn counting_cleanup(counter: &Arc<AtomicUsize>) -> Option<Cleanup> {
        let counter = counter.clone();
        Some(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test(tokio::test)]
    async fn resolves_with_the_value_passed_to_the_resolver() {
        let result = binding::<u32, SensorError, _>(|resolver| {
            resolver.succeed(42);
            None
        })
        .await;

        assert_eq!(result, Ok(42));
    }

    #[test(tokio::test)]
    async fn fails_with_the_error_passed_to_the_resolver() {
        let result = binding::<u32, SensorError, _>(|resolver| {
            resolver.fail(SensorError::Timeout("too slow".to_string()));
            None
        })
        .await;

        assert_eq!(result, Err(SensorError::Timeout("too slow".to_string())));
    }

    #[test(tokio::test)]
    async fn keeps_the_first_resolution() {
        let mut second = None;
        let result = binding::<u32, SensorError, _>(|resolver| {
            assert!(resolver.succeed(1));
            second = Some(resolver.clone().fail(SensorError::Timeout(String::new())));
            None
        })
        .await;

        assert_eq!(result, Ok(1));
        assert_eq!(second, Some(false));
    }

    #[test(tokio::test)]
    async fn fails_as_abandoned_once_every_resolver_is_dropped() {
        let result = binding::<u32, SensorError, _>(|resolver| {
            drop(resolver);
            None
        })
        .await;

        assert_eq!(result, Err(SensorError::Abandoned(Abandoned)));
    }

    #[test(tokio::test)]
    async fn resolves_from_another_thread() {
        let result = binding::<&str, SensorError, _>(|resolver| {
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(10));
                resolver.succeed("done");
            });
            None
        })
        .await;

        assert_eq!(result, Ok("done"));
    }

    #[test(tokio::test)]
    async fn runs_the_cleanup_once_when_dropped_before_settling() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut kept = None;
        let pending = binding::<u32, SensorError, _>(|resolver| {
            kept = Some(resolver);
            counting_cleanup(&counter)
        });

        let result = timeout(Duration::from_millis(10), pending).await;

        assert!(result.is_err(), "Expected the binding to still be pending");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!kept.unwrap().succeed(1), "Expected a dropped binding to refuse resolution");
    }

    #[test(tokio::test)]
    async fn skips_the_cleanup_once_settled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let result = binding::<u32, SensorError, _>(|resolver| {
            resolver.succeed(7);
            counting_cleanup(&counter)
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn reports_whether_it_was_resolved() {
        let mut kept = None;
        let _binding = binding::<u32, SensorError, _>(|resolver| {
            kept = Some(resolver);
            None
        });
        let resolver = kept.unwrap();

        assert!(!resolver.is_resolved());
        resolver.succeed(3);
        assert!(resolver.is_resolved());
    }
}
