use crate::platform::{
    OnceError, OnceSuccess, PlatformOptions, PositionSource, RawError, RawPosition, WatchError, WatchId, WatchSuccess,
};
use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

/// In-memory position source that fires callbacks on demand.
#[derive(Default)]
pub(crate) struct FakePositionSource {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    next_watch_id: u64,
    pending: VecDeque<(OnceSuccess, OnceError)>,
    watches: HashMap<WatchId, Arc<Watcher>>,
    cleared: HashMap<WatchId, Arc<Watcher>>,
    received_options: Vec<PlatformOptions>,
}

struct Watcher {
    on_success: WatchSuccess,
    on_error: WatchError,
}

impl FakePositionSource {
    pub fn new() -> Arc<Self> {
        Arc::new(FakePositionSource::default())
    }

    pub fn pending_requests(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    pub fn active_watches(&self) -> usize {
        self.state.lock().unwrap().watches.len()
    }

    pub fn cleared_watches(&self) -> usize {
        self.state.lock().unwrap().cleared.len()
    }

    pub fn received_options(&self) -> Vec<PlatformOptions> {
        self.state.lock().unwrap().received_options.clone()
    }

    /// Answers the oldest pending one-shot request with a position.
    pub fn answer_position(&self, position: RawPosition) {
        let (on_success, _) = self.state.lock().unwrap().pending.pop_front().expect("no pending request");
        on_success(position);
    }

    /// Answers the oldest pending one-shot request with an error.
    pub fn answer_error(&self, error: RawError) {
        let (_, on_error) = self.state.lock().unwrap().pending.pop_front().expect("no pending request");
        on_error(error);
    }

    /// Forgets every pending one-shot request without answering it.
    pub fn drop_pending(&self) {
        self.state.lock().unwrap().pending.clear();
    }

    pub fn emit_position(&self, watch_id: WatchId, position: RawPosition) {
        if let Some(watcher) = self.active(watch_id) {
            (watcher.on_success)(position);
        }
    }

    pub fn emit_error(&self, watch_id: WatchId, error: RawError) {
        if let Some(watcher) = self.active(watch_id) {
            (watcher.on_error)(error);
        }
    }

    /// Fires a position through the callbacks of a watch even if it was already cleared, simulating a callback
    /// that was in flight while the watch got cleared.
    pub fn emit_in_flight_position(&self, watch_id: WatchId, position: RawPosition) {
        let watcher = {
            let state = self.state.lock().unwrap();
            state.watches.get(&watch_id).or_else(|| state.cleared.get(&watch_id)).cloned()
        };
        if let Some(watcher) = watcher {
            (watcher.on_success)(position);
        }
    }

    fn active(&self, watch_id: WatchId) -> Option<Arc<Watcher>> {
        self.state.lock().unwrap().watches.get(&watch_id).cloned()
    }
}

impl PositionSource for FakePositionSource {
    fn get_current_position(&self, on_success: OnceSuccess, on_error: OnceError, options: PlatformOptions) {
        let mut state = self.state.lock().unwrap();
        state.received_options.push(options);
        state.pending.push_back((on_success, on_error));
    }

    fn watch_position(&self, on_success: WatchSuccess, on_error: WatchError, options: PlatformOptions) -> WatchId {
        let mut state = self.state.lock().unwrap();
        state.next_watch_id += 1;
        let watch_id = WatchId(state.next_watch_id);
        state.received_options.push(options);
        state.watches.insert(watch_id, Arc::new(Watcher { on_success, on_error }));
        watch_id
    }

    fn clear_watch(&self, watch_id: WatchId) {
        let mut state = self.state.lock().unwrap();
        let watcher = state
            .watches
            .remove(&watch_id)
            .unwrap_or_else(|| panic!("watch {} cleared twice or never registered", watch_id));
        state.cleared.insert(watch_id, watcher);
    }
}

impl Debug for FakePositionSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("FakePositionSource")
            .field("pending", &state.pending.len())
            .field("watches", &state.watches.keys().collect::<Vec<_>>())
            .field("cleared", &state.cleared.keys().collect::<Vec<_>>())
            .finish()
    }
}
