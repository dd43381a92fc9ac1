use crate::scheduler::Spawner;
use futures::future::BoxFuture;
use std::fmt::{Debug, Formatter};
use std::mem;
use std::sync::Mutex;

/// Keeps spawned tasks instead of running them, so tests can count and order them.
#[derive(Default)]
pub(crate) struct RecordingSpawner {
    tasks: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl RecordingSpawner {
    pub fn spawned(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Runs every recorded task to completion, in spawn order.
    pub async fn run_all(&self) {
        let tasks = mem::take(&mut *self.tasks.lock().unwrap());
        for task in tasks {
            task.await;
        }
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.tasks.lock().unwrap().push(task);
    }
}

impl Debug for RecordingSpawner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSpawner").field("spawned", &self.spawned()).finish()
    }
}
