//! Intent dispatcher — maps a recognized `(intent, slots)` pair to facade calls.
//!
//! Mapping ([`IntentVocabulary::plan`]) is pure and has no side effects;
//! [`IntentDispatcher::dispatch`] executes the planned [`Command`] against
//! the configured devices. Combinations the vocabulary does not know are
//! silently ignored.

use std::collections::BTreeMap;

use voxhub_domain::error::VoxHubError;
use voxhub_domain::intent::IntentDirective;
use voxhub_domain::resource::Resource;

use crate::devices::{Appliance, Light, LightGroup};
use crate::ports::Gateway;

/// Slot carrying the device the utterance talks about.
pub const OBJECT_SLOT: &str = "object";
/// Slot carrying the requested state or scene label.
pub const STATE_SLOT: &str = "state";

/// What a planned intent does to the devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ApplianceOn,
    ApplianceOff,
    LightsOn,
    LightsOff,
    /// Recall the named gateway scene on the primary light group.
    RecallScene(String),
}

/// Result of dispatching one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The directive maps to no command.
    Ignored,
    /// At least one device request was sent for the command.
    Issued(Command),
    /// The command had no configured, resolved device to go to.
    Skipped(Command),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApplianceOn => f.write_str("appliance_on"),
            Self::ApplianceOff => f.write_str("appliance_off"),
            Self::LightsOn => f.write_str("lights_on"),
            Self::LightsOff => f.write_str("lights_off"),
            Self::RecallScene(scene) => write!(f, "recall_scene({scene})"),
        }
    }
}

/// The words the inference context uses for intents, objects, and states.
///
/// Matching ignores case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentVocabulary {
    /// Intent name that switches devices.
    pub change_state_intent: String,
    /// Object values that mean the appliance.
    pub machine_aliases: Vec<String>,
    /// Object value that means the lights.
    pub lights_alias: String,
    /// State value that means "on".
    pub on_alias: String,
    /// State value that means "off".
    pub off_alias: String,
    /// State values accepted as scene labels, mapped to gateway scene names.
    pub scenes: BTreeMap<String, String>,
}

impl Default for IntentVocabulary {
    fn default() -> Self {
        Self {
            change_state_intent: "changeState".to_string(),
            machine_aliases: vec!["kaffeemaschine".to_string(), "maschine".to_string()],
            lights_alias: "licht".to_string(),
            on_alias: "an".to_string(),
            off_alias: "aus".to_string(),
            scenes: BTreeMap::new(),
        }
    }
}

impl IntentVocabulary {
    /// Decide what `directive` asks for, if anything.
    #[must_use]
    pub fn plan(&self, directive: &IntentDirective) -> Option<Command> {
        if !same_word(&directive.intent, &self.change_state_intent) {
            return None;
        }
        let object = directive.slot(OBJECT_SLOT)?;
        let state = directive.slot(STATE_SLOT)?;

        if self.machine_aliases.iter().any(|alias| same_word(object, alias)) {
            if same_word(state, &self.on_alias) {
                return Some(Command::ApplianceOn);
            }
            if same_word(state, &self.off_alias) {
                return Some(Command::ApplianceOff);
            }
            return None;
        }

        if same_word(object, &self.lights_alias) {
            if same_word(state, &self.on_alias) {
                return Some(Command::LightsOn);
            }
            if same_word(state, &self.off_alias) {
                return Some(Command::LightsOff);
            }
            return self
                .scenes
                .iter()
                .find(|(label, _)| same_word(state, label))
                .map(|(_, scene)| Command::RecallScene(scene.clone()));
        }

        None
    }
}

fn same_word(said: &str, known: &str) -> bool {
    said.trim().eq_ignore_ascii_case(known.trim())
}

/// Executes planned commands against the devices it holds.
pub struct IntentDispatcher<G> {
    vocabulary: IntentVocabulary,
    appliance: Option<Appliance<G>>,
    light_group: Option<LightGroup<G>>,
    aux_lights: Vec<Light<G>>,
}

impl<G: Gateway> IntentDispatcher<G> {
    #[must_use]
    pub fn new(vocabulary: IntentVocabulary) -> Self {
        Self {
            vocabulary,
            appliance: None,
            light_group: None,
            aux_lights: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_appliance(mut self, appliance: Appliance<G>) -> Self {
        self.appliance = Some(appliance);
        self
    }

    #[must_use]
    pub fn with_light_group(mut self, group: LightGroup<G>) -> Self {
        self.light_group = Some(group);
        self
    }

    #[must_use]
    pub fn with_aux_light(mut self, light: Light<G>) -> Self {
        self.aux_lights.push(light);
        self
    }

    #[must_use]
    pub fn vocabulary(&self) -> &IntentVocabulary {
        &self.vocabulary
    }

    /// Plan and execute `directive`.
    ///
    /// A planned command is [`Dispatch::Issued`] only when a request actually
    /// went out; with no configured or resolved target it is
    /// [`Dispatch::Skipped`]. For commands touching several devices every
    /// device is attempted; the first failure is returned after all attempts.
    ///
    /// # Errors
    ///
    /// Returns the first facade error (transport failure, unresolved device,
    /// unknown scene).
    #[tracing::instrument(skip(self, directive), fields(intent = %directive.intent))]
    pub async fn dispatch(
        &mut self,
        directive: &IntentDirective,
    ) -> Result<Dispatch, VoxHubError> {
        let Some(command) = self.vocabulary.plan(directive) else {
            tracing::debug!(slots = ?directive.slots, "no command for directive");
            return Ok(Dispatch::Ignored);
        };
        tracing::info!(%command, "dispatching");
        if self.execute(&command).await? {
            Ok(Dispatch::Issued(command))
        } else {
            tracing::warn!(%command, "no device to execute command on");
            Ok(Dispatch::Skipped(command))
        }
    }

    /// Returns whether any request was sent.
    async fn execute(&mut self, command: &Command) -> Result<bool, VoxHubError> {
        match command {
            Command::ApplianceOn | Command::ApplianceOff => {
                let Some(appliance) = self.appliance.as_mut() else {
                    tracing::warn!(%command, "no appliance configured");
                    return Ok(false);
                };
                if !addressable(appliance.resource()) {
                    return Ok(false);
                }
                if *command == Command::ApplianceOn {
                    appliance.on().await?;
                } else {
                    appliance.off().await?;
                }
                Ok(true)
            }
            Command::LightsOn | Command::LightsOff => {
                self.switch_lights(*command == Command::LightsOn).await
            }
            Command::RecallScene(scene) => {
                let Some(group) = self.light_group.as_ref() else {
                    tracing::warn!(%command, "no light group configured");
                    return Ok(false);
                };
                if !addressable(group.resource()) {
                    return Ok(false);
                }
                group.recall_scene(scene).await?;
                Ok(true)
            }
        }
    }

    async fn switch_lights(&mut self, on: bool) -> Result<bool, VoxHubError> {
        let mut first_error = None;
        let mut issued = false;

        if let Some(group) = self.light_group.as_mut()
            && addressable(group.resource())
        {
            issued = true;
            let result = if on { group.on().await } else { group.off().await };
            if let Err(err) = result {
                tracing::error!(device = %group.resource().name, error = %err, "failed to switch light group");
                first_error.get_or_insert(err);
            }
        }

        for light in &mut self.aux_lights {
            if !addressable(light.resource()) {
                continue;
            }
            issued = true;
            let result = if on { light.on().await } else { light.off().await };
            if let Err(err) = result {
                tracing::error!(device = %light.resource().name, error = %err, "failed to switch light");
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(issued), Err)
    }
}

/// Whether requests may be sent to `resource`; unresolved devices are skipped.
fn addressable(resource: &Resource) -> bool {
    if resource.is_resolved() {
        return true;
    }
    tracing::warn!(device = %resource.name, kind = %resource.kind, "skipping unresolved device");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_client::Requirement;
    use crate::testing::FakeGateway;
    use std::sync::Arc;
    use voxhub_domain::id::ResourceId;
    use voxhub_domain::light_state::{LightState, StatePatch};
    use voxhub_domain::resource::ResourceKind;

    fn vocabulary() -> IntentVocabulary {
        IntentVocabulary {
            scenes: BTreeMap::from([
                ("gemütlich".to_string(), "Entspannen".to_string()),
                ("hell".to_string(), "Konzentrieren".to_string()),
            ]),
            ..IntentVocabulary::default()
        }
    }

    fn change_state(object: &str, state: &str) -> IntentDirective {
        IntentDirective::new("changeState")
            .with_slot(OBJECT_SLOT, object)
            .with_slot(STATE_SLOT, state)
    }

    fn gateway() -> Arc<FakeGateway> {
        Arc::new(
            FakeGateway::new()
                .with_light("4", "Kaffeemaschine", LightState::default())
                .with_light("1", "Kaffeebar", LightState::new(true, 80))
                .with_light("6", "Stehlampe", LightState::default())
                .with_group("2", "Wohnzimmer", LightState::default())
                .with_scene("2", "9", "Entspannen"),
        )
    }

    async fn dispatcher(gateway: &Arc<FakeGateway>) -> IntentDispatcher<FakeGateway> {
        let appliance =
            Appliance::connect(Arc::clone(gateway), "Kaffeemaschine", Requirement::Optional)
                .await
                .unwrap();
        let group = LightGroup::connect(Arc::clone(gateway), "Wohnzimmer", Requirement::Required)
            .await
            .unwrap();
        let lamp = Light::connect(Arc::clone(gateway), "Stehlampe", Requirement::Optional)
            .await
            .unwrap();
        IntentDispatcher::new(vocabulary())
            .with_appliance(appliance)
            .with_light_group(group)
            .with_aux_light(lamp)
    }

    #[test]
    fn should_plan_appliance_on_for_every_machine_alias() {
        let vocabulary = vocabulary();
        assert_eq!(
            vocabulary.plan(&change_state("Kaffeemaschine", "an")),
            Some(Command::ApplianceOn)
        );
        assert_eq!(
            vocabulary.plan(&change_state(" maschine ", "AUS")),
            Some(Command::ApplianceOff)
        );
    }

    #[test]
    fn should_plan_scene_recall_for_known_label() {
        assert_eq!(
            vocabulary().plan(&change_state("licht", "gemütlich")),
            Some(Command::RecallScene("Entspannen".to_string()))
        );
    }

    #[test]
    fn should_ignore_unknown_scene_label() {
        assert_eq!(vocabulary().plan(&change_state("licht", "xyz")), None);
    }

    #[test]
    fn should_ignore_unknown_object() {
        assert_eq!(vocabulary().plan(&change_state("toaster", "an")), None);
    }

    #[test]
    fn should_ignore_scene_label_for_machine() {
        assert_eq!(vocabulary().plan(&change_state("maschine", "gemütlich")), None);
    }

    #[test]
    fn should_ignore_other_intents_and_missing_slots() {
        let vocabulary = vocabulary();
        let other = IntentDirective::new("orderBeverage")
            .with_slot(OBJECT_SLOT, "maschine")
            .with_slot(STATE_SLOT, "an");
        assert_eq!(vocabulary.plan(&other), None);
        let partial = IntentDirective::new("changeState").with_slot(OBJECT_SLOT, "licht");
        assert_eq!(vocabulary.plan(&partial), None);
    }

    #[tokio::test]
    async fn should_switch_only_the_appliance_for_machine_on() {
        let gateway = gateway();
        let mut dispatcher = dispatcher(&gateway).await;

        let command = dispatcher
            .dispatch(&change_state("kaffeemaschine", "an"))
            .await
            .unwrap();

        assert_eq!(command, Dispatch::Issued(Command::ApplianceOn));
        let writes = gateway.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].kind, ResourceKind::Light);
        assert_eq!(writes[0].id, ResourceId::new("4"));
        assert_eq!(writes[0].patch, StatePatch::new().on(true));
    }

    #[tokio::test]
    async fn should_switch_group_and_aux_lights_on() {
        let gateway = gateway();
        let mut dispatcher = dispatcher(&gateway).await;

        dispatcher.dispatch(&change_state("licht", "an")).await.unwrap();

        assert_eq!(
            gateway.writes_to(ResourceKind::Group, "2"),
            vec![StatePatch::new().on(true)]
        );
        assert_eq!(
            gateway.writes_to(ResourceKind::Light, "6"),
            vec![StatePatch::new().on(true)]
        );
        assert!(gateway.writes_to(ResourceKind::Light, "4").is_empty());
    }

    #[tokio::test]
    async fn should_switch_everything_off() {
        let gateway = gateway();
        let mut dispatcher = dispatcher(&gateway).await;

        dispatcher.dispatch(&change_state("licht", "aus")).await.unwrap();

        assert_eq!(gateway.writes().len(), 2);
        assert!(gateway.writes().iter().all(|w| w.patch == StatePatch::new().on(false)));
    }

    #[tokio::test]
    async fn should_recall_scene_on_primary_group() {
        let gateway = gateway();
        let mut dispatcher = dispatcher(&gateway).await;

        dispatcher
            .dispatch(&change_state("licht", "gemütlich"))
            .await
            .unwrap();

        assert_eq!(gateway.recalls(), vec![(ResourceId::new("2"), "9".to_string())]);
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn should_issue_no_call_for_unknown_scene_label() {
        let gateway = gateway();
        let mut dispatcher = dispatcher(&gateway).await;
        let reads_after_setup = gateway.reads();

        let command = dispatcher.dispatch(&change_state("licht", "xyz")).await.unwrap();

        assert_eq!(command, Dispatch::Ignored);
        assert!(gateway.writes().is_empty());
        assert!(gateway.recalls().is_empty());
        assert_eq!(gateway.reads(), reads_after_setup);
    }

    #[tokio::test]
    async fn should_attempt_all_lights_when_one_fails() {
        let gateway = gateway();
        let mut dispatcher = dispatcher(&gateway).await;
        gateway.fail_next_writes(1);

        let result = dispatcher.dispatch(&change_state("licht", "an")).await;

        assert!(matches!(result, Err(VoxHubError::Transport(_))));
        assert_eq!(
            gateway.writes_to(ResourceKind::Light, "6"),
            vec![StatePatch::new().on(true)]
        );
    }

    #[tokio::test]
    async fn should_skip_unresolved_appliance_without_request() {
        let gateway = Arc::new(FakeGateway::new());
        let appliance =
            Appliance::connect(Arc::clone(&gateway), "Kaffeemaschine", Requirement::Optional)
                .await
                .unwrap();
        let mut dispatcher = IntentDispatcher::new(vocabulary()).with_appliance(appliance);

        let command = dispatcher.dispatch(&change_state("maschine", "an")).await.unwrap();

        assert_eq!(command, Dispatch::Skipped(Command::ApplianceOn));
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn should_skip_scene_recall_for_unresolved_group() {
        let gateway = Arc::new(FakeGateway::new().with_scene("2", "9", "Entspannen"));
        let group = LightGroup::connect(Arc::clone(&gateway), "Wohnzimmer", Requirement::Optional)
            .await
            .unwrap();
        let mut dispatcher = IntentDispatcher::new(vocabulary()).with_light_group(group);

        let command = dispatcher
            .dispatch(&change_state("licht", "gemütlich"))
            .await
            .unwrap();

        assert_eq!(
            command,
            Dispatch::Skipped(Command::RecallScene("Entspannen".to_string()))
        );
        assert!(gateway.recalls().is_empty());
    }

    #[tokio::test]
    async fn should_skip_lights_when_none_is_resolved() {
        let gateway = Arc::new(FakeGateway::new());
        let missing = Light::connect(Arc::clone(&gateway), "Flur", Requirement::Optional)
            .await
            .unwrap();
        let mut dispatcher = IntentDispatcher::new(vocabulary()).with_aux_light(missing);

        let command = dispatcher.dispatch(&change_state("licht", "an")).await.unwrap();

        assert_eq!(command, Dispatch::Skipped(Command::LightsOn));
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn should_skip_unresolved_aux_light_and_switch_the_rest() {
        let gateway = gateway();
        let missing = Light::connect(Arc::clone(&gateway), "Flur", Requirement::Optional)
            .await
            .unwrap();
        let mut dispatcher = dispatcher(&gateway).await.with_aux_light(missing);

        let command = dispatcher.dispatch(&change_state("licht", "an")).await.unwrap();

        assert_eq!(command, Dispatch::Issued(Command::LightsOn));
        assert_eq!(gateway.writes().len(), 2);
        assert!(gateway.writes().iter().all(|w| w.id.is_resolved()));
    }

    #[tokio::test]
    async fn should_do_nothing_when_device_is_not_configured() {
        let gateway = gateway();
        let mut dispatcher: IntentDispatcher<FakeGateway> = IntentDispatcher::new(vocabulary());

        let command = dispatcher.dispatch(&change_state("maschine", "an")).await.unwrap();

        assert_eq!(command, Dispatch::Skipped(Command::ApplianceOn));
        assert!(gateway.writes().is_empty());
    }
}
