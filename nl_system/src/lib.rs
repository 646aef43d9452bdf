//! Host adapter for the NetLens core.
//!
//! Provides a [`source::SystemSource`] answering property queries from the
//! host interface table and a [`watcher::SystemWatcher`] that polls the
//! table and converts scan differences into change events.

pub mod source;
pub mod watcher;

pub use source::SystemSource;
pub use watcher::{SystemWatcher, WatcherConfig};
