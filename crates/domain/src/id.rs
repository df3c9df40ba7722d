//! Identifier newtypes.
//!
//! [`ResourceId`] is opaque and assigned by the gateway. [`SessionId`] is
//! generated locally to correlate the log lines of one animation session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_uuid_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_uuid_id!(
    /// Unique identifier for one animation session.
    SessionId
);

/// Wire value the gateway never assigns, used for devices whose name lookup missed.
const UNRESOLVED: &str = "0";

/// Opaque identifier of a light or group, as assigned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap a gateway-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel id for an optional device that could not be resolved.
    #[must_use]
    pub fn unresolved() -> Self {
        Self(UNRESOLVED.to_string())
    }

    /// Whether this id points at a real gateway resource.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.0 != UNRESOLVED
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_session_ids() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn should_parse_session_id_from_display() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_mark_sentinel_as_unresolved() {
        assert!(!ResourceId::unresolved().is_resolved());
        assert_eq!(ResourceId::unresolved().as_str(), "0");
    }

    #[test]
    fn should_treat_gateway_ids_as_resolved() {
        let id = ResourceId::new("12");
        assert!(id.is_resolved());
        assert_eq!(id.to_string(), "12");
    }

    #[test]
    fn should_serialize_resource_id_as_plain_string() {
        let json = serde_json::to_string(&ResourceId::new("3")).unwrap();
        assert_eq!(json, "\"3\"");
    }
}
