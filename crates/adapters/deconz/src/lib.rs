//! # voxhub-adapter-deconz
//!
//! deCONZ adapter — talks to a Zigbee gateway over its REST API.
//!
//! ## Responsibilities
//! - Implement the [`Gateway`](voxhub_app::ports::Gateway) port with `reqwest`
//! - Map the `lights` / `groups` collections, state writes, and scene recalls
//!   onto `/api/{key}/…` requests
//! - Bound every request with a client timeout, and single-resource reads
//!   with a shorter read timeout
//! - Convert transport failures into
//!   [`VoxHubError::Transport`](voxhub_domain::error::VoxHubError::Transport)
//!
//! ## Dependency rule
//! Depends on `voxhub-app` (for the port trait) and `voxhub-domain`.

pub mod config;
pub mod error;
pub mod gateway;

pub use config::DeconzConfig;
pub use error::DeconzError;
pub use gateway::DeconzGateway;
