//! In-memory [`Gateway`] used by the unit tests of this crate.
//!
//! Records every write and recall, counts reads, and tracks how many writes
//! are in flight at the same time.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use voxhub_domain::error::VoxHubError;
use voxhub_domain::id::ResourceId;
use voxhub_domain::light_state::{LightState, StatePatch};
use voxhub_domain::resource::{ResourceKind, ResourceSnapshot, ResourceSummary};
use voxhub_domain::scene::Scene;

use crate::ports::Gateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedWrite {
    pub kind: ResourceKind,
    pub id: ResourceId,
    pub patch: StatePatch,
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    resources: Mutex<BTreeMap<(ResourceKind, String), (String, LightState)>>,
    scenes: Mutex<HashMap<String, Vec<Scene>>>,
    writes: Mutex<Vec<RecordedWrite>>,
    recalls: Mutex<Vec<(ResourceId, String)>>,
    reads: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    write_delay: Mutex<Duration>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    failing_writes_left: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_light(self, id: &str, name: &str, state: LightState) -> Self {
        self.insert(ResourceKind::Light, id, name, state);
        self
    }

    pub fn with_group(self, id: &str, name: &str, state: LightState) -> Self {
        self.insert(ResourceKind::Group, id, name, state);
        self
    }

    pub fn with_scene(self, group_id: &str, scene_id: &str, name: &str) -> Self {
        lock(&self.scenes)
            .entry(group_id.to_string())
            .or_default()
            .push(Scene {
                id: scene_id.to_string(),
                name: name.to_string(),
            });
        self
    }

    pub fn with_write_delay(self, delay: Duration) -> Self {
        *lock(&self.write_delay) = delay;
        self
    }

    fn insert(&self, kind: ResourceKind, id: &str, name: &str, state: LightState) {
        lock(&self.resources).insert((kind, id.to_string()), (name.to_string(), state));
    }

    /// Change the state on the "device" behind the gateway's back.
    pub fn set_remote_state(&self, kind: ResourceKind, id: &str, state: LightState) {
        if let Some(entry) = lock(&self.resources).get_mut(&(kind, id.to_string())) {
            entry.1 = state;
        }
    }

    pub fn remote_state(&self, kind: ResourceKind, id: &str) -> Option<LightState> {
        lock(&self.resources)
            .get(&(kind, id.to_string()))
            .map(|(_, state)| *state)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail only the next `count` writes.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes_left.store(count, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        lock(&self.writes).clone()
    }

    pub fn writes_to(&self, kind: ResourceKind, id: &str) -> Vec<StatePatch> {
        lock(&self.writes)
            .iter()
            .filter(|w| w.kind == kind && w.id.as_str() == id)
            .map(|w| w.patch)
            .collect()
    }

    pub fn recalls(&self) -> Vec<(ResourceId, String)> {
        lock(&self.recalls).clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn transport_error(what: &str) -> VoxHubError {
        VoxHubError::Transport(Box::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("fake gateway: {what} failed"),
        )))
    }

    fn should_fail_write(&self) -> bool {
        if self.fail_writes.load(Ordering::SeqCst) {
            return true;
        }
        self.failing_writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

impl Gateway for FakeGateway {
    fn list_resources(
        &self,
        kind: ResourceKind,
    ) -> impl Future<Output = Result<Vec<ResourceSummary>, VoxHubError>> + Send {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_reads.load(Ordering::SeqCst) {
            Err(Self::transport_error("list"))
        } else {
            Ok(lock(&self.resources)
                .iter()
                .filter(|((k, _), _)| *k == kind)
                .map(|((_, id), (name, _))| ResourceSummary {
                    id: ResourceId::new(id.clone()),
                    name: name.clone(),
                })
                .collect())
        };
        async { result }
    }

    fn get_resource(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> impl Future<Output = Result<ResourceSnapshot, VoxHubError>> + Send {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_reads.load(Ordering::SeqCst) {
            Err(Self::transport_error("read"))
        } else {
            lock(&self.resources)
                .get(&(kind, id.to_string()))
                .map(|(name, state)| ResourceSnapshot {
                    name: name.clone(),
                    state: *state,
                })
                .ok_or_else(|| Self::transport_error("read of unknown resource"))
        };
        async { result }
    }

    async fn write_state(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        patch: &StatePatch,
    ) -> Result<(), VoxHubError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *lock(&self.write_delay);
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }

        let failed = self.should_fail_write();
        if !failed {
            if let Some(entry) = lock(&self.resources).get_mut(&(kind, id.to_string())) {
                entry.1.apply(patch);
            }
            lock(&self.writes).push(RecordedWrite {
                kind,
                id: id.clone(),
                patch: *patch,
            });
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if failed {
            Err(Self::transport_error("write"))
        } else {
            Ok(())
        }
    }

    fn list_scenes(
        &self,
        _kind: ResourceKind,
        id: &ResourceId,
    ) -> impl Future<Output = Result<Vec<Scene>, VoxHubError>> + Send {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_reads.load(Ordering::SeqCst) {
            Err(Self::transport_error("scene list"))
        } else {
            Ok(lock(&self.scenes)
                .get(id.as_str())
                .cloned()
                .unwrap_or_default())
        };
        async { result }
    }

    fn recall_scene(
        &self,
        _kind: ResourceKind,
        id: &ResourceId,
        scene_id: &str,
    ) -> impl Future<Output = Result<(), VoxHubError>> + Send {
        let result = if self.should_fail_write() {
            Err(Self::transport_error("recall"))
        } else {
            lock(&self.recalls).push((id.clone(), scene_id.to_string()));
            Ok(())
        };
        async { result }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
