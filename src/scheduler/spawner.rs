use crate::GeolocationError;
use futures::future::BoxFuture;
use std::fmt::Debug;
use tokio::runtime::Handle;

/// Runs a task detached from the caller.
///
/// `spawn` is called from platform callbacks and must return without running the task inline.
pub trait Spawner: Debug + Send + Sync {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// Spawns onto a tokio runtime. Holding the handle allows callbacks on non-runtime threads to spawn.
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    handle: Handle,
}

impl TokioSpawner {
    pub fn new(handle: Handle) -> Self {
        TokioSpawner { handle }
    }

    pub fn current() -> Result<Self, GeolocationError> {
        Ok(TokioSpawner::new(Handle::try_current()?))
    }
}

impl Spawner for TokioSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.handle.spawn(task);
    }
}
