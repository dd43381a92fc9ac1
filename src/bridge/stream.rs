use crate::bridge::{SubscriptionHandle, WatchEvent};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// The events of a subscription as a [`Stream`]. Ends once the subscription is cancelled and drained, and
/// cancels the subscription when dropped.
#[derive(Debug)]
pub struct LocationStream {
    events: UnboundedReceiverStream<WatchEvent>,
    handle: SubscriptionHandle,
}

impl LocationStream {
    pub(crate) fn new(events: UnboundedReceiverStream<WatchEvent>, handle: SubscriptionHandle) -> Self {
        LocationStream { events, handle }
    }

    pub fn handle(&self) -> &SubscriptionHandle {
        &self.handle
    }
}

impl Stream for LocationStream {
    type Item = WatchEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

impl Drop for LocationStream {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
