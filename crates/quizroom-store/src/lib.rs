//! Quizroom — in-process collaborator implementations.
//!
//! The session services only know the port traits; this crate provides the
//! single-process defaults: map-backed stores and a broadcast-channel
//! notification transport. A durable backend would replace this crate
//! without touching the session context.

mod memory;
mod notifier;

pub use memory::MemoryStore;
pub use notifier::BroadcastNotifier;
