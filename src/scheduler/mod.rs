//! Task primitives the bridge is built on: detached spawning and callback-to-future binding.

mod binding;
mod spawner;

#[cfg(test)]
pub(crate) mod recording;

pub use binding::{Binding, Cleanup, Resolver, binding};
pub use spawner::{Spawner, TokioSpawner};
