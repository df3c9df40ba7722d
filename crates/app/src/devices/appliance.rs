//! Appliance — a switchable plug (coffee machine) that only knows on and off.

use std::sync::Arc;

use voxhub_domain::error::VoxHubError;
use voxhub_domain::resource::ResourceKind;

use super::{Facade, facade_accessors};
use crate::ports::Gateway;
use crate::resource_client::Requirement;

/// A switchable appliance listed in the `lights` collection.
pub struct Appliance<G> {
    inner: Facade<G>,
}

impl<G: Gateway> Appliance<G> {
    /// Resolve the appliance called `name` on the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Transport`] when the lookup fails, or
    /// [`VoxHubError::NotFound`] when a [`Requirement::Required`] appliance
    /// is missing.
    pub async fn connect(
        gateway: Arc<G>,
        name: &str,
        requirement: Requirement,
    ) -> Result<Self, VoxHubError> {
        let inner = Facade::connect(gateway, ResourceKind::Light, name, requirement).await?;
        Ok(Self { inner })
    }

    facade_accessors!();
}
