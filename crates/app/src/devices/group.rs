//! Light group — switched through the group action endpoint, owns the scenes.

use std::sync::Arc;

use voxhub_domain::error::VoxHubError;
use voxhub_domain::resource::ResourceKind;

use super::{Facade, facade_accessors};
use crate::ports::Gateway;
use crate::resource_client::Requirement;

/// A group in the `groups` collection.
///
/// `on` / `off` go to `/{id}/action`, never to a per-light `state` endpoint.
pub struct LightGroup<G> {
    inner: Facade<G>,
}

impl<G: Gateway> LightGroup<G> {
    /// Resolve the group called `name` on the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the lookup fails, or
    /// [`VoxHubError::NotFound`] when a [`Requirement::Required`] group is
    /// missing.
    pub async fn connect(
        gateway: Arc<G>,
        name: &str,
        requirement: Requirement,
    ) -> Result<Self, VoxHubError> {
        let inner = Facade::connect(gateway, ResourceKind::Group, name, requirement).await?;
        Ok(Self { inner })
    }

    facade_accessors!();

    /// Recall the scene called `scene_name` stored on this group.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::NotFound`] when the group has no such scene,
    /// or [`VoxHubError::Transport`] when a request fails.
    pub async fn recall_scene(&self, scene_name: &str) -> Result<(), VoxHubError> {
        self.inner.recall_scene(scene_name).await
    }
}
