//! Playback actions
//!
//! The four string-valued commands accepted by the controller. Unrecognized
//! strings fail to parse; the dispatcher treats them as no-ops that still
//! repost the status display.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Action dispatched to the playback controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Pause,
    Resume,
    Stop,
}

impl Action {
    /// Wire string for this action, as carried by display action buttons
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Stop => "stop",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action string the controller does not recognize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "start" => Ok(Action::Start),
            "pause" => Ok(Action::Pause),
            "resume" => Ok(Action::Resume),
            "stop" => Ok(Action::Stop),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
