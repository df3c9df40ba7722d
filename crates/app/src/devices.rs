//! Device facades — typed wrappers exposing only what each kind supports.
//!
//! | Facade | Collection | `on` / `off` write to | Scenes |
//! |--------|------------|-----------------------|--------|
//! | [`Light`] | `lights` | `/{id}/state` | no |
//! | [`Appliance`] | `lights` | `/{id}/state` | no |
//! | [`LightGroup`] | `groups` | `/{id}/action` | yes |
//!
//! Each facade owns its cached `(on, brightness)` snapshot. The snapshot is
//! only ever updated by the facade's own `refresh()` or by its own
//! successful writes.

mod appliance;
mod group;
mod light;

pub use appliance::Appliance;
pub use group::LightGroup;
pub use light::Light;

use std::sync::Arc;

use voxhub_domain::error::{NotFoundError, VoxHubError};
use voxhub_domain::light_state::{LightState, StatePatch};
use voxhub_domain::resource::{Resource, ResourceKind};
use voxhub_domain::time::{self, Timestamp};

use crate::ports::Gateway;
use crate::resource_client::{Requirement, ResourceClient};

/// Shared core of every facade: the bound resource and its cached state.
struct Facade<G> {
    client: ResourceClient<G>,
    resource: Resource,
    cached: LightState,
    refreshed_at: Option<Timestamp>,
}

impl<G> Clone for Facade<G> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            resource: self.resource.clone(),
            cached: self.cached,
            refreshed_at: self.refreshed_at,
        }
    }
}

impl<G: Gateway> Facade<G> {
    async fn connect(
        gateway: Arc<G>,
        kind: ResourceKind,
        name: &str,
        requirement: Requirement,
    ) -> Result<Self, VoxHubError> {
        let client = ResourceClient::new(gateway, kind);
        let resource = client.bind(name, requirement).await?;
        Ok(Self {
            client,
            resource,
            cached: LightState::default(),
            refreshed_at: None,
        })
    }

    fn ensure_resolved(&self) -> Result<(), VoxHubError> {
        if self.resource.is_resolved() {
            return Ok(());
        }
        tracing::debug!(device = %self.resource.name, "skipping request to unresolved device");
        Err(NotFoundError {
            entity: self.resource.kind.label(),
            name: self.resource.name.clone(),
        }
        .into())
    }

    async fn write(&mut self, patch: StatePatch) -> Result<(), VoxHubError> {
        self.ensure_resolved()?;
        self.client.set_state(&self.resource.id, &patch).await?;
        self.cached.apply(&patch);
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), VoxHubError> {
        self.ensure_resolved()?;
        match self.client.get_resource(&self.resource.id).await {
            Ok(snapshot) => {
                if snapshot.name != self.resource.name {
                    tracing::warn!(
                        device = %self.resource.name,
                        resource = %self.resource.id,
                        gateway_name = %snapshot.name,
                        "resource was renamed on the gateway"
                    );
                }
                if let Some(previous) = self.refreshed_at {
                    tracing::trace!(
                        device = %self.resource.name,
                        age_ms = time::millis_since(previous),
                        "replacing cached state"
                    );
                }
                self.cached = snapshot.state;
                self.refreshed_at = Some(time::now());
                Ok(())
            }
            Err(err) => {
                tracing::warn!(device = %self.resource.name, resource = %self.resource.id, error = %err, "failed to refresh state");
                Err(err)
            }
        }
    }

    async fn recall_scene(&self, scene_name: &str) -> Result<(), VoxHubError> {
        self.ensure_resolved()?;
        self.client.recall_scene(&self.resource.id, scene_name).await
    }
}

/// Accessors shared by all facades.
macro_rules! facade_accessors {
    () => {
        /// The bound gateway resource.
        #[must_use]
        pub fn resource(&self) -> &voxhub_domain::resource::Resource {
            &self.inner.resource
        }

        /// Last cached state; only as fresh as the last `refresh()` or write.
        #[must_use]
        pub fn cached_state(&self) -> voxhub_domain::light_state::LightState {
            self.inner.cached
        }

        /// When the cached state was last read from the gateway.
        #[must_use]
        pub fn refreshed_at(&self) -> Option<voxhub_domain::time::Timestamp> {
            self.inner.refreshed_at
        }

        /// Re-read `on` / `brightness` from the gateway into the cache.
        ///
        /// On failure the cached state is left unchanged.
        ///
        /// # Errors
        ///
        /// Returns [`VoxHubError::Transport`] when the read fails or times
        /// out, or [`VoxHubError::NotFound`] for an unresolved device.
        pub async fn refresh(&mut self) -> Result<(), VoxHubError> {
            self.inner.refresh().await
        }

        /// Switch the device on.
        ///
        /// # Errors
        ///
        /// Returns [`VoxHubError::Transport`] when the write fails, or
        /// [`VoxHubError::NotFound`] for an unresolved device.
        pub async fn on(&mut self) -> Result<(), VoxHubError> {
            self.inner
                .write(voxhub_domain::light_state::StatePatch::new().on(true))
                .await
        }

        /// Switch the device off.
        ///
        /// # Errors
        ///
        /// Returns [`VoxHubError::Transport`] when the write fails, or
        /// [`VoxHubError::NotFound`] for an unresolved device.
        pub async fn off(&mut self) -> Result<(), VoxHubError> {
            self.inner
                .write(voxhub_domain::light_state::StatePatch::new().on(false))
                .await
        }
    };
}

pub(crate) use facade_accessors;
