//! Gateway port — the narrow verb surface every device kind shares.
//!
//! An implementation talks to one gateway (`/api/{key}`) and must bound every
//! call with a timeout so a slow resource cannot stall the caller.

use std::future::Future;

use voxhub_domain::error::VoxHubError;
use voxhub_domain::id::ResourceId;
use voxhub_domain::light_state::StatePatch;
use voxhub_domain::resource::{ResourceKind, ResourceSnapshot, ResourceSummary};
use voxhub_domain::scene::Scene;

/// Read/write access to the resources of a smart-home gateway.
///
/// All failures (unreachable host, timeout, non-2xx answer, undecodable body)
/// surface as [`VoxHubError::Transport`].
pub trait Gateway: Send + Sync {
    /// `GET /{collection}` — every resource of `kind` with its name.
    fn list_resources(
        &self,
        kind: ResourceKind,
    ) -> impl Future<Output = Result<Vec<ResourceSummary>, VoxHubError>> + Send;

    /// `GET /{collection}/{id}` with a short read timeout.
    fn get_resource(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> impl Future<Output = Result<ResourceSnapshot, VoxHubError>> + Send;

    /// `PUT /{collection}/{id}/{state|action}` with the minimal JSON patch.
    fn write_state(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        patch: &StatePatch,
    ) -> impl Future<Output = Result<(), VoxHubError>> + Send;

    /// `GET /{collection}/{id}/scenes`.
    fn list_scenes(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> impl Future<Output = Result<Vec<Scene>, VoxHubError>> + Send;

    /// `PUT /{collection}/{id}/scenes/{scene_id}/recall`.
    fn recall_scene(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        scene_id: &str,
    ) -> impl Future<Output = Result<(), VoxHubError>> + Send;
}
