//! # voxhubd — voxhub daemon
//!
//! Composition root that wires the gateway adapter, device facades, and voice
//! session together, then feeds voice events from stdin into the session.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Build the deCONZ gateway client
//! - Resolve the configured devices and construct their facades
//! - Construct the animator, intent dispatcher, and voice session
//! - Read JSON-line voice events until EOF or Ctrl-C
//! - Restore the feedback light before exiting
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod events;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use voxhub_adapter_deconz::DeconzGateway;
use voxhub_app::animation::Animator;
use voxhub_app::devices::{Appliance, Light, LightGroup};
use voxhub_app::dispatcher::IntentDispatcher;
use voxhub_app::resource_client::Requirement;
use voxhub_app::session::VoiceSession;

use crate::config::Config;
use crate::events::VoiceEvent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(gateway = %config.gateway.base_url, "starting voxhubd");

    let gateway =
        Arc::new(DeconzGateway::new(&config.gateway).context("failed to build gateway client")?);
    let mut session = build_session(gateway, &config)
        .await
        .context("failed to set up devices")?;

    let result = run(&mut session).await;
    session.shutdown().await;
    tracing::info!("voxhubd stopped");
    result
}

async fn build_session(
    gateway: Arc<DeconzGateway>,
    config: &Config,
) -> anyhow::Result<VoiceSession<DeconzGateway>> {
    let devices = &config.devices;
    let mut dispatcher = IntentDispatcher::new(config.intents.to_vocabulary());

    if let Some(name) = &devices.appliance {
        let appliance = Appliance::connect(Arc::clone(&gateway), name, Requirement::Optional).await?;
        dispatcher = dispatcher.with_appliance(appliance);
    }
    if let Some(name) = &devices.light_group {
        let group = LightGroup::connect(Arc::clone(&gateway), name, Requirement::Required)
            .await
            .with_context(|| format!("light group {name:?}"))?;
        dispatcher = dispatcher.with_light_group(group);
    }
    for name in &devices.aux_lights {
        let light = Light::connect(Arc::clone(&gateway), name, Requirement::Optional).await?;
        dispatcher = dispatcher.with_aux_light(light);
    }

    let mut session =
        VoiceSession::new(dispatcher).with_acknowledge(config.animation.acknowledge);
    if let Some(name) = &devices.feedback_light {
        let light = Light::connect(gateway, name, Requirement::Required)
            .await
            .with_context(|| format!("feedback light {name:?}"))?;
        session = session.with_feedback(Animator::new(
            light,
            config.animation.to_animation_config(),
        ));
    }
    Ok(session)
}

async fn run(session: &mut VoiceSession<DeconzGateway>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    tracing::info!("end of input");
                    return Ok(());
                };
                handle_line(session, &line).await;
            }
            _ = &mut shutdown => {
                tracing::info!("received Ctrl-C, shutting down");
                return Ok(());
            }
        }
    }
}

async fn handle_line(session: &mut VoiceSession<DeconzGateway>, line: &str) {
    match events::parse_line(line) {
        Ok(Some(VoiceEvent::WakeWord)) => session.on_wake_word().await,
        Ok(Some(VoiceEvent::Inference(inference))) => {
            let outcome = session.on_inference(inference).await;
            tracing::debug!(?outcome, "inference handled");
        }
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "skipping malformed event"),
    }
}
