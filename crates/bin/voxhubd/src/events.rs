//! Voice events read from stdin, one JSON object per line.
//!
//! ```text
//! {"event":"wake_word"}
//! {"event":"inference","is_understood":true,"intent":"changeState","slots":{"object":"licht","state":"an"}}
//! ```

use serde::Deserialize;
use voxhub_domain::intent::Inference;

/// An event emitted by the wake-word and inference engines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VoiceEvent {
    WakeWord,
    Inference(Inference),
}

/// Parse one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns the JSON error for a line that is not a known event.
pub fn parse_line(line: &str) -> Result<Option<VoiceEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}
