//! Scene — a named preset stored on the gateway.

use serde::{Deserialize, Serialize};

/// A scene as listed under a resource's `scenes` sub-collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub name: String,
}

/// Find the scene called `name` in `scenes`.
#[must_use]
pub fn find_by_name<'a>(scenes: &'a [Scene], name: &str) -> Option<&'a Scene> {
    scenes.iter().find(|scene| scene.name == name)
}
