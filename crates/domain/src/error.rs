//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`VoxHubError`]
//! via `From`. Adapters box their transport failures into
//! [`VoxHubError::Transport`] so the application layer never sees
//! adapter-specific types.

use crate::id::ResourceId;

/// Boxed error produced by a gateway transport (HTTP client, mock, …).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum VoxHubError {
    /// A value failed a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A named resource or scene does not exist on the gateway.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The gateway could not be reached, timed out, or answered non-2xx.
    #[error("transport error")]
    Transport(#[source] BoxError),

    /// A caller broke the animation state machine contract.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl VoxHubError {
    /// Whether this error is a [`VoxHubError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error is a [`VoxHubError::Transport`].
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Invariant violations on domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("resource id must not be empty")]
    EmptyResourceId,
}

/// A lookup by name missed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {name}")]
pub struct NotFoundError {
    /// What was looked up (`"Light"`, `"Group"`, `"Scene"`).
    pub entity: &'static str,
    /// The name that was searched for.
    pub name: String,
}

/// Programming errors that the animation state machine refuses to tolerate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// `acknowledge` was called while an animation session was live.
    #[error("cannot acknowledge resource {0} while an animation is running")]
    AcknowledgeWhileAnimating(ResourceId),
}
