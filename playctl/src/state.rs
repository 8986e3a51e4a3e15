//! Playback state management
//!
//! The observable player state is derived from the single live session, so
//! the state enum and the session contents cannot disagree.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Observable playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// No session alive (also the terminal state after stop)
    Idle,
    /// Handle acquired, waiting for the backend to report ready
    Loading,
    Playing,
    Paused,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
        }
    }
}

/// Readiness phase of a loaded backend handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Asynchronous prepare in progress; the handle must not be operated
    Loading,
    /// Backend reported ready; play/pause/resume/stop are permitted
    Ready,
}

/// The single live playback session
///
/// At most one session exists at a time. Dropping it out of the controller
/// releases the backend handle; its id guards against stale backend events
/// arriving after release.
#[derive(Debug)]
pub struct PlaybackSession<H> {
    pub id: Uuid,
    pub handle: H,
    pub phase: Phase,
    /// Meaningful only once `phase == Ready`; set exclusively by a
    /// successful pause transition
    pub paused: bool,
}

impl<H> PlaybackSession<H> {
    pub fn new(id: Uuid, handle: H) -> Self {
        Self {
            id,
            handle,
            phase: Phase::Loading,
            paused: false,
        }
    }

    /// Observable state of this session
    pub fn state(&self) -> PlayerState {
        match (self.phase, self.paused) {
            (Phase::Loading, _) => PlayerState::Loading,
            (Phase::Ready, false) => PlayerState::Playing,
            (Phase::Ready, true) => PlayerState::Paused,
        }
    }
}
