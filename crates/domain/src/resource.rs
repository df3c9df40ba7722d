//! Resource — a gateway-addressable light or group.
//!
//! Every device kind shares the same narrow verb surface on the gateway; the
//! only difference between kinds is the collection they live in and the
//! endpoint state writes go to.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, VoxHubError};
use crate::id::ResourceId;
use crate::light_state::LightState;

/// The gateway collection a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A single light or switchable plug, written through `/{id}/state`.
    Light,
    /// A light group, written through `/{id}/action`.
    Group,
}

impl ResourceKind {
    /// Path segment of the collection (`lights` / `groups`).
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Light => "lights",
            Self::Group => "groups",
        }
    }

    /// Path segment state writes go to (`state` / `action`).
    #[must_use]
    pub fn write_target(self) -> &'static str {
        match self {
            Self::Light => "state",
            Self::Group => "action",
        }
    }

    /// Human label used in errors and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Group => "Group",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection())
    }
}

/// One entry of a collection listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: ResourceId,
    pub name: String,
}

/// Point-in-time read of a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub name: String,
    pub state: LightState,
}

/// A named resource bound to its gateway id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub id: ResourceId,
    pub kind: ResourceKind,
}

impl Resource {
    /// Bind `name` to `id`, checking invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Validation`] when `name` or `id` is empty.
    pub fn new(
        name: impl Into<String>,
        id: ResourceId,
        kind: ResourceKind,
    ) -> Result<Self, VoxHubError> {
        let resource = Self {
            name: name.into(),
            id,
            kind,
        };
        resource.validate()?;
        Ok(resource)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Validation`] when `name` or `id` is empty.
    pub fn validate(&self) -> Result<(), VoxHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.id.as_str().is_empty() {
            return Err(ValidationError::EmptyResourceId.into());
        }
        Ok(())
    }

    /// Whether the name lookup for this resource succeeded.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.id.is_resolved()
    }
}
