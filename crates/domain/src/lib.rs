//! # voxhub-domain
//!
//! Pure domain model for the voxhub voice controller.
//!
//! ## Responsibilities
//! - Foundational types: resource identifiers, error conventions, timestamps
//! - Define **Resources** (gateway-addressable lights and groups) and their kinds
//! - Define **Light state** snapshots and the partial **state patches** written to them
//! - Define **Scenes** (gateway-stored presets recallable by id)
//! - Define **Intents** (recognized utterances handed over by the inference engine)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod intent;
pub mod light_state;
pub mod resource;
pub mod scene;
