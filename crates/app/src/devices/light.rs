//! Single light — `on`, `off`, and arbitrary partial writes for animations.

use std::sync::Arc;

use voxhub_domain::error::VoxHubError;
use voxhub_domain::light_state::{LightState, StatePatch};
use voxhub_domain::resource::ResourceKind;

use super::{Facade, facade_accessors};
use crate::ports::Gateway;
use crate::resource_client::Requirement;

/// A dimmable light in the `lights` collection.
pub struct Light<G> {
    inner: Facade<G>,
}

impl<G> Clone for Light<G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<G: Gateway> Light<G> {
    /// Resolve the light called `name` on the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the lookup fails, or
    /// [`VoxHubError::NotFound`] when a [`Requirement::Required`] light is
    /// missing.
    pub async fn connect(
        gateway: Arc<G>,
        name: &str,
        requirement: Requirement,
    ) -> Result<Self, VoxHubError> {
        let inner = Facade::connect(gateway, ResourceKind::Light, name, requirement).await?;
        Ok(Self { inner })
    }

    facade_accessors!();

    /// Write a partial state; the cache is updated only if the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the write fails, or
    /// [`VoxHubError::NotFound`] for an unresolved light.
    pub async fn set_state(&mut self, patch: StatePatch) -> Result<(), VoxHubError> {
        self.inner.write(patch).await
    }
}

impl<G> Light<G> {
    /// Take over the cached state an animation session ended with.
    pub(crate) fn adopt_state(&mut self, state: LightState) {
        self.inner.cached = state;
    }
}
