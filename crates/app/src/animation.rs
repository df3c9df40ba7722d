//! Animation controller — visual feedback on one light.
//!
//! Per-light state machine: `Idle → Animating → Idle`.
//!
//! - [`Animator::start_listening`] spawns a background task that pulses the
//!   light between two brightness levels until cancelled. Starting while a
//!   session is live stops and joins that session first, so two loops never
//!   write to the same light at once.
//! - [`Animator::stop`] signals cancellation and waits until the task has
//!   written the pre-animation state back and exited.
//! - [`Animator::acknowledge`] plays a finite blink inline and restores the
//!   original state on its own.
//!
//! The session task works on its own clone of the [`Light`] facade and hands
//! the final cached state back through its join handle. While a session is
//! live the animator does not touch its own copy, so the cached state has a
//! single writer at any time without a lock.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use voxhub_domain::error::{ContractViolation, VoxHubError};
use voxhub_domain::id::SessionId;
use voxhub_domain::light_state::{LightState, StatePatch};

use crate::devices::Light;
use crate::ports::Gateway;

/// Timing and brightness constants of the feedback animations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Delay between two frames of the listening pulse.
    pub cadence: Duration,
    /// Brightness added on the bright frame of the listening pulse.
    pub pulse_step: u8,
    /// Floor for the listening pulse and the dim frame of the acknowledgement.
    pub min_brightness: u8,
    /// Bright frame of the acknowledgement blink.
    pub ack_brightness: u8,
    /// How long each acknowledgement frame is held.
    pub ack_cadence: Duration,
    /// Number of bright/dim pairs in the acknowledgement blink.
    pub ack_pulses: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cadence: Duration::from_millis(200),
            pulse_step: 20,
            min_brightness: 20,
            ack_brightness: 110,
            ack_cadence: Duration::from_millis(250),
            ack_pulses: 2,
        }
    }
}

impl AnimationConfig {
    /// The two brightness levels the listening pulse alternates between.
    #[must_use]
    pub fn listening_levels(&self, original: LightState) -> [u8; 2] {
        let low = original.brightness.max(self.min_brightness);
        [low, low.saturating_add(self.pulse_step)]
    }
}

/// A live listening animation.
struct Session {
    id: SessionId,
    stop: watch::Sender<bool>,
    handle: JoinHandle<LightState>,
    original: LightState,
}

/// Runs at most one feedback animation at a time on one light.
pub struct Animator<G> {
    light: Light<G>,
    config: AnimationConfig,
    session: Option<Session>,
}

impl<G: Gateway + 'static> Animator<G> {
    #[must_use]
    pub fn new(light: Light<G>, config: AnimationConfig) -> Self {
        Self {
            light,
            config,
            session: None,
        }
    }

    /// Whether a listening animation is live.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// The animated light.
    ///
    /// While animating, its cached state is the pre-animation snapshot.
    #[must_use]
    pub fn light(&self) -> &Light<G> {
        &self.light
    }

    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Start the listening pulse, restarting it if one is already live.
    ///
    /// The light is refreshed first so the state restored by [`stop`](Self::stop)
    /// is the one the light had right before the animation.
    ///
    /// # Errors
    ///
    /// Returns the refresh error when the pre-animation state cannot be
    /// read; the animator then stays idle.
    pub async fn start_listening(&mut self) -> Result<(), VoxHubError> {
        if self.is_animating() {
            tracing::debug!(
                device = %self.light.resource().name,
                "listening animation already running, restarting"
            );
            self.stop().await;
        }

        self.light.refresh().await?;
        let original = self.light.cached_state();
        let (stop, stop_rx) = watch::channel(false);
        let id = SessionId::new();
        let span = tracing::info_span!(
            "listening",
            session = %id,
            device = %self.light.resource().name,
        );
        let handle = tokio::spawn(
            run_listening(self.light.clone(), original, self.config.clone(), stop_rx)
                .instrument(span),
        );
        tracing::debug!(session = %id, ?original, "listening animation started");
        self.session = Some(Session {
            id,
            stop,
            handle,
            original,
        });
        Ok(())
    }

    /// Cancel the live animation and wait until the original state is back.
    ///
    /// No-op when idle.
    pub async fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        // A send error means the task is already gone; the join below still
        // reports how it ended.
        let _ = session.stop.send(true);
        match session.handle.await {
            Ok(state) => {
                self.light.adopt_state(state);
                tracing::debug!(session = %session.id, "listening animation stopped");
            }
            Err(err) => {
                self.light.adopt_state(session.original);
                tracing::error!(session = %session.id, error = %err, "listening animation task failed");
            }
        }
    }

    /// Stop any live animation, then re-read the light.
    ///
    /// Refresh failures are logged; the controller is idle either way.
    pub async fn done(&mut self) {
        self.stop().await;
        if let Err(err) = self.light.refresh().await {
            tracing::warn!(error = %err, "could not refresh light after animation");
        }
    }

    /// Blink to confirm a command: bright → dim, `ack_pulses` times, then
    /// restore the original state.
    ///
    /// # Errors
    ///
    /// Returns [`VoxHubError::Contract`] when a listening animation is live,
    /// or the refresh error when the original state cannot be read. Failed
    /// frame writes are logged and skipped.
    pub async fn acknowledge(&mut self) -> Result<(), VoxHubError> {
        if self.is_animating() {
            return Err(
                ContractViolation::AcknowledgeWhileAnimating(self.light.resource().id.clone())
                    .into(),
            );
        }

        self.light.refresh().await?;
        let original = self.light.cached_state();
        let bright = StatePatch::new().on(true).brightness(self.config.ack_brightness);
        let dim = StatePatch::new().on(true).brightness(self.config.min_brightness);

        for _ in 0..self.config.ack_pulses {
            for frame in [bright, dim] {
                write_frame(&mut self.light, frame).await;
                tokio::time::sleep(self.config.ack_cadence).await;
            }
        }
        restore(&mut self.light, original).await;
        Ok(())
    }
}

async fn run_listening<G: Gateway>(
    mut light: Light<G>,
    original: LightState,
    config: AnimationConfig,
    mut stop: watch::Receiver<bool>,
) -> LightState {
    let levels = config.listening_levels(original);
    for brightness in levels.iter().copied().cycle() {
        if *stop.borrow() {
            break;
        }
        write_frame(&mut light, StatePatch::new().on(true).brightness(brightness)).await;
        tokio::select! {
            // Fires on the stop signal and when the animator is dropped.
            _ = stop.changed() => break,
            () = tokio::time::sleep(config.cadence) => {}
        }
    }
    restore(&mut light, original).await;
    light.cached_state()
}

async fn write_frame<G: Gateway>(light: &mut Light<G>, frame: StatePatch) {
    if let Err(err) = light.set_state(frame).await {
        tracing::warn!(fields = %frame, error = %err, "skipping animation frame");
    }
}

async fn restore<G: Gateway>(light: &mut Light<G>, original: LightState) {
    if let Err(err) = light.set_state(original.to_patch()).await {
        tracing::error!(?original, error = %err, "failed to restore state after animation");
    }
}
