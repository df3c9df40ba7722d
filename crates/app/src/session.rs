//! Voice session — reacts to wake-word and inference events.
//!
//! A wake word starts the listening pulse on the feedback light. The
//! inference result ends it; an understood utterance is then dispatched and,
//! when configured, confirmed with a short blink.

use voxhub_domain::intent::Inference;

use crate::animation::Animator;
use crate::dispatcher::{Command, Dispatch, IntentDispatcher};
use crate::ports::Gateway;

/// What happened to one inference event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The utterance was not understood.
    NotUnderstood,
    /// Understood, but no command matches it.
    Ignored,
    /// The command was executed.
    Executed(Command),
    /// Understood, but no device was available to execute the command.
    Skipped(Command),
    /// The command was attempted and at least one device call failed.
    Failed(Command),
}

/// Glue between the voice events and the devices.
pub struct VoiceSession<G> {
    feedback: Option<Animator<G>>,
    dispatcher: IntentDispatcher<G>,
    acknowledge: bool,
}

impl<G: Gateway + 'static> VoiceSession<G> {
    #[must_use]
    pub fn new(dispatcher: IntentDispatcher<G>) -> Self {
        Self {
            feedback: None,
            dispatcher,
            acknowledge: false,
        }
    }

    /// Drive listening feedback on `animator`.
    #[must_use]
    pub fn with_feedback(mut self, animator: Animator<G>) -> Self {
        self.feedback = Some(animator);
        self
    }

    /// Blink the feedback light after every executed command.
    #[must_use]
    pub fn with_acknowledge(mut self, acknowledge: bool) -> Self {
        self.acknowledge = acknowledge;
        self
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Animator<G>> {
        self.feedback.as_ref()
    }

    /// Start the listening pulse.
    ///
    /// Failures are logged; the session keeps accepting events.
    #[tracing::instrument(skip(self))]
    pub async fn on_wake_word(&mut self) {
        tracing::info!("wake word detected");
        let Some(animator) = self.feedback.as_mut() else {
            return;
        };
        if let Err(err) = animator.start_listening().await {
            tracing::error!(error = %err, "failed to start listening feedback");
        }
    }

    /// End the listening pulse and act on the recognized utterance.
    #[tracing::instrument(skip(self, inference), fields(understood = inference.is_understood))]
    pub async fn on_inference(&mut self, inference: Inference) -> Outcome {
        if let Some(animator) = self.feedback.as_mut() {
            animator.done().await;
        }

        let Some(directive) = inference.into_directive() else {
            tracing::info!("didn't understand");
            return Outcome::NotUnderstood;
        };

        match self.dispatcher.dispatch(&directive).await {
            Ok(Dispatch::Ignored) => Outcome::Ignored,
            Ok(Dispatch::Skipped(command)) => Outcome::Skipped(command),
            Ok(Dispatch::Issued(command)) => {
                self.confirm().await;
                Outcome::Executed(command)
            }
            Err(err) => {
                tracing::error!(intent = %directive.intent, error = %err, "failed to execute intent");
                let command = self.dispatcher.vocabulary().plan(&directive);
                command.map_or(Outcome::Ignored, Outcome::Failed)
            }
        }
    }

    /// Stop any live animation so the feedback light is left as it was.
    pub async fn shutdown(&mut self) {
        if let Some(animator) = self.feedback.as_mut() {
            animator.stop().await;
        }
    }

    async fn confirm(&mut self) {
        if !self.acknowledge {
            return;
        }
        let Some(animator) = self.feedback.as_mut() else {
            return;
        };
        if let Err(err) = animator.acknowledge().await {
            tracing::warn!(error = %err, "failed to acknowledge command");
        }
    }
}
