//! # voxhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **gateway port** that adapters must implement (`Gateway`):
//!   list a collection, read a resource, write state, list and recall scenes
//! - Provide the **resource client** that resolves names to ids and logs
//!   every write
//! - Provide typed **device facades** (`Light`, `LightGroup`, `Appliance`)
//! - Run cancellable **feedback animations** (`Animator`)
//! - Map recognized intents to facade calls (`IntentDispatcher`)
//! - Expose the callback entry points of one voice session (`VoiceSession`)
//!
//! ## Dependency rule
//! Depends on `voxhub-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod animation;
pub mod devices;
pub mod dispatcher;
pub mod ports;
pub mod resource_client;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
