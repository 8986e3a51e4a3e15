//! Status display capability and content projection
//!
//! The persistent status display is a stateless projection of the player
//! state: a body text, an icon, one primary action button that toggles
//! between pause and resume, and a constant stop button. Content is rebuilt
//! on every transition and never diffed against what is currently shown.

use serde::Serialize;

use crate::action::Action;
use crate::error::Result;
use crate::state::PlayerState;

/// Constant display title
pub const DISPLAY_TITLE: &str = "Audio control";

pub const BODY_PREPARING: &str = "Preparing audio";
pub const BODY_PLAYING: &str = "Playing audio";
pub const BODY_PAUSED: &str = "Audio paused";

/// Icon shown on the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Play,
    Pause,
}

/// A user-tappable button: label plus the action string it dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub label: &'static str,
    pub action: Action,
}

impl ActionButton {
    pub const PAUSE: ActionButton = ActionButton {
        label: "Pause",
        action: Action::Pause,
    };

    pub const RESUME: ActionButton = ActionButton {
        label: "Resume",
        action: Action::Resume,
    };

    pub const STOP: ActionButton = ActionButton {
        label: "Stop",
        action: Action::Stop,
    };
}

/// Full content of the persistent status display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusContent {
    pub title: &'static str,
    pub body: &'static str,
    pub icon: Icon,
    /// Toggles between pause and resume depending on state
    pub primary: ActionButton,
    /// Always present
    pub stop: ActionButton,
}

impl StatusContent {
    /// Placeholder shown before the first transition completes
    pub fn preparing() -> Self {
        Self {
            title: DISPLAY_TITLE,
            body: BODY_PREPARING,
            icon: Icon::Play,
            primary: ActionButton::PAUSE,
            stop: ActionButton::STOP,
        }
    }

    pub fn playing() -> Self {
        Self {
            title: DISPLAY_TITLE,
            body: BODY_PLAYING,
            icon: Icon::Pause,
            primary: ActionButton::PAUSE,
            stop: ActionButton::STOP,
        }
    }

    pub fn paused() -> Self {
        Self {
            title: DISPLAY_TITLE,
            body: BODY_PAUSED,
            icon: Icon::Play,
            primary: ActionButton::RESUME,
            stop: ActionButton::STOP,
        }
    }

    /// Projection of a player state into display content
    pub fn for_state(state: PlayerState) -> Self {
        match state {
            PlayerState::Idle | PlayerState::Loading => Self::preparing(),
            PlayerState::Playing => Self::playing(),
            PlayerState::Paused => Self::paused(),
        }
    }
}

/// Capability for the platform display service
///
/// `post` creates or replaces the single persistent status entry; `remove`
/// clears it. The controller logs and swallows failures from both, as it has
/// no other user-visible error surface.
pub trait StatusDisplay: Send + 'static {
    fn post(&mut self, content: &StatusContent) -> Result<()>;

    fn remove(&mut self) -> Result<()>;
}
