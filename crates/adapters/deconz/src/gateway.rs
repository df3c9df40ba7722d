//! [`Gateway`] implementation over the deCONZ REST API.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `list_resources` | `GET /api/{key}/{lights\|groups}` |
//! | `get_resource` | `GET /api/{key}/{lights\|groups}/{id}` |
//! | `write_state` | `PUT /api/{key}/lights/{id}/state` or `/groups/{id}/action` |
//! | `list_scenes` | `GET /api/{key}/groups/{id}/scenes` |
//! | `recall_scene` | `PUT /api/{key}/groups/{id}/scenes/{scene}/recall` |

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use voxhub_app::ports::Gateway;
use voxhub_domain::error::VoxHubError;
use voxhub_domain::id::ResourceId;
use voxhub_domain::light_state::{LightState, StatePatch};
use voxhub_domain::resource::{ResourceKind, ResourceSnapshot, ResourceSummary};
use voxhub_domain::scene::Scene;

use crate::config::DeconzConfig;
use crate::error::DeconzError;

/// Collection entry; every field besides the name is ignored.
#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

/// Single-resource body. Lights carry their switchable state in `state`,
/// groups in `action` (a group's `state` only holds `all_on` / `any_on`).
#[derive(Debug, Deserialize)]
struct ResourceBody {
    name: String,
    #[serde(default)]
    state: Option<serde_json::Value>,
    #[serde(default)]
    action: Option<serde_json::Value>,
}

/// HTTP client for one deCONZ gateway.
#[derive(Debug, Clone)]
pub struct DeconzGateway {
    client: reqwest::Client,
    api_root: String,
    read_timeout: Duration,
}

impl DeconzGateway {
    /// Build a client bounded by the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DeconzError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &DeconzConfig) -> Result<Self, DeconzError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(DeconzError::Client)?;
        Ok(Self {
            client,
            api_root: config.api_root(),
            read_timeout: config.read_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_root)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Option<Duration>,
    ) -> Result<T, DeconzError> {
        let mut request = self.client.get(self.url(path));
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let body = send(path, request).await?;
        serde_json::from_str(&body).map_err(|source| DeconzError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn put_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), DeconzError> {
        let request = self.client.put(self.url(path)).json(body);
        send(path, request).await?;
        Ok(())
    }
}

/// Send `request` and return the body of a 2xx response.
///
/// The URL is stripped from transport errors since it contains the API key.
async fn send(path: &str, request: reqwest::RequestBuilder) -> Result<String, DeconzError> {
    let request_error = |source: reqwest::Error| DeconzError::Request {
        path: path.to_string(),
        source: source.without_url(),
    };
    let response = request.send().await.map_err(request_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DeconzError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().await.map_err(request_error)?;
    tracing::trace!(path, status = status.as_u16(), "gateway response");
    Ok(body)
}

fn parse_snapshot(
    kind: ResourceKind,
    path: &str,
    body: ResourceBody,
) -> Result<ResourceSnapshot, DeconzError> {
    let field = kind.write_target();
    let value = match kind {
        ResourceKind::Light => body.state,
        ResourceKind::Group => body.action,
    };
    let value = value.ok_or_else(|| DeconzError::MissingField {
        path: path.to_string(),
        field,
    })?;
    let state: LightState =
        serde_json::from_value(value).map_err(|source| DeconzError::Decode {
            path: path.to_string(),
            source,
        })?;
    Ok(ResourceSnapshot {
        name: body.name,
        state,
    })
}

impl Gateway for DeconzGateway {
    #[tracing::instrument(skip(self), fields(kind = %kind))]
    async fn list_resources(
        &self,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceSummary>, VoxHubError> {
        let entries: BTreeMap<String, NamedEntry> =
            self.get_json(kind.collection(), None).await?;
        tracing::debug!(count = entries.len(), "listed resources");
        Ok(entries
            .into_iter()
            .map(|(id, entry)| ResourceSummary {
                id: ResourceId::new(id),
                name: entry.name,
            })
            .collect())
    }

    #[tracing::instrument(skip(self), fields(kind = %kind, resource = %id))]
    async fn get_resource(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<ResourceSnapshot, VoxHubError> {
        let path = format!("{}/{id}", kind.collection());
        let body: ResourceBody = self.get_json(&path, Some(self.read_timeout)).await?;
        Ok(parse_snapshot(kind, &path, body)?)
    }

    async fn write_state(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        patch: &StatePatch,
    ) -> Result<(), VoxHubError> {
        let path = format!("{}/{id}/{}", kind.collection(), kind.write_target());
        self.put_json(&path, patch).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(kind = %kind, resource = %id))]
    async fn list_scenes(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Vec<Scene>, VoxHubError> {
        let path = format!("{}/{id}/scenes", kind.collection());
        let entries: BTreeMap<String, NamedEntry> = self.get_json(&path, None).await?;
        Ok(entries
            .into_iter()
            .map(|(id, entry)| Scene {
                id,
                name: entry.name,
            })
            .collect())
    }

    async fn recall_scene(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        scene_id: &str,
    ) -> Result<(), VoxHubError> {
        let path = format!("{}/{id}/scenes/{scene_id}/recall", kind.collection());
        self.put_json(&path, &serde_json::Map::new()).await?;
        Ok(())
    }
}
