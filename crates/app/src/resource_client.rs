//! Resource client — name resolution and logged reads/writes for one collection.
//!
//! A single client type serves every device kind: the [`ResourceKind`] it is
//! bound to picks the collection (`lights` / `groups`) and the write target
//! (`state` / `action`).

use std::sync::Arc;

use voxhub_domain::error::{NotFoundError, VoxHubError};
use voxhub_domain::id::ResourceId;
use voxhub_domain::light_state::StatePatch;
use voxhub_domain::resource::{Resource, ResourceKind, ResourceSnapshot};
use voxhub_domain::scene;

use crate::ports::Gateway;

/// Whether startup may continue when a device name is missing on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A missing name aborts construction.
    Required,
    /// A missing name is logged and the device is bound to the sentinel id.
    Optional,
}

/// Client for the resources of one collection on the gateway.
pub struct ResourceClient<G> {
    gateway: Arc<G>,
    kind: ResourceKind,
}

impl<G> Clone for ResourceClient<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            kind: self.kind,
        }
    }
}

impl<G: Gateway> ResourceClient<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>, kind: ResourceKind) -> Self {
        Self { gateway, kind }
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Resolve a human-readable name to its gateway id.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::NotFound`] when no resource is called `name`,
    /// or [`VoxHubError::Transport`] when the collection read fails.
    #[tracing::instrument(skip(self), fields(kind = %self.kind))]
    pub async fn resolve(&self, name: &str) -> Result<ResourceId, VoxHubError> {
        let resources = self.gateway.list_resources(self.kind).await?;
        resources
            .into_iter()
            .find(|resource| resource.name == name)
            .map(|resource| resource.id)
            .ok_or_else(|| {
                NotFoundError {
                    entity: self.kind.label(),
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Resolve `name` and bind it, applying the startup policy for misses.
    ///
    /// A transport failure is always fatal. A missing name is fatal only for
    /// [`Requirement::Required`] devices; optional ones get
    /// [`ResourceId::unresolved`].
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the collection read fails, or
    /// [`VoxHubError::NotFound`] when a required name is missing.
    pub async fn bind(
        &self,
        name: &str,
        requirement: Requirement,
    ) -> Result<Resource, VoxHubError> {
        let id = match self.resolve(name).await {
            Ok(id) => id,
            Err(err) if err.is_not_found() && requirement == Requirement::Optional => {
                tracing::error!(device = name, kind = %self.kind, "failed to find resource, continuing without it");
                ResourceId::unresolved()
            }
            Err(err) => return Err(err),
        };
        tracing::debug!(device = name, kind = %self.kind, resource = %id, "resource bound");
        Resource::new(name, id, self.kind)
    }

    /// Write a partial state to the resource.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the gateway rejects or drops
    /// the request.
    pub async fn set_state(&self, id: &ResourceId, patch: &StatePatch) -> Result<(), VoxHubError> {
        match self.gateway.write_state(self.kind, id, patch).await {
            Ok(()) => {
                tracing::info!(kind = %self.kind, resource = %id, fields = %patch, "updated state");
                Ok(())
            }
            Err(err) => {
                tracing::error!(kind = %self.kind, resource = %id, fields = %patch, error = %err, "failed to update state");
                Err(err)
            }
        }
    }

    /// Read the current snapshot of the resource.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the read fails or times out.
    pub async fn get_resource(&self, id: &ResourceId) -> Result<ResourceSnapshot, VoxHubError> {
        self.gateway.get_resource(self.kind, id).await
    }

    /// Recall the scene called `scene_name` on the resource.
    ///
    /// The scene list is fetched on every call.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::NotFound`] when no scene matches, or
    /// [`VoxHubError::Transport`] when a request fails.
    #[tracing::instrument(skip(self), fields(kind = %self.kind, resource = %id))]
    pub async fn recall_scene(&self, id: &ResourceId, scene_name: &str) -> Result<(), VoxHubError> {
        let scenes = self.gateway.list_scenes(self.kind, id).await?;
        let scene = scene::find_by_name(&scenes, scene_name).ok_or_else(|| NotFoundError {
            entity: "Scene",
            name: scene_name.to_string(),
        })?;
        self.gateway.recall_scene(self.kind, id, &scene.id).await?;
        tracing::info!(scene = scene_name, scene_id = %scene.id, "recalled scene");
        Ok(())
    }
}
