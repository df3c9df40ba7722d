//! Intents — what the inference engine understood from one utterance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw inference result delivered once per utterance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inference {
    pub is_understood: bool,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub slots: HashMap<String, String>,
}

impl Inference {
    /// An inference the engine could not match to any intent.
    #[must_use]
    pub fn not_understood() -> Self {
        Self::default()
    }

    /// The directive to dispatch, if the utterance was understood.
    #[must_use]
    pub fn into_directive(self) -> Option<IntentDirective> {
        self.is_understood.then(|| IntentDirective {
            intent: self.intent,
            slots: self.slots,
        })
    }
}

/// An understood intent with its slot values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntentDirective {
    pub intent: String,
    #[serde(default)]
    pub slots: HashMap<String, String>,
}

impl IntentDirective {
    #[must_use]
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            slots: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// Value of slot `name`, if the engine filled it.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}
