//! # playctl
//!
//! Notification-driven audio playback controller.
//!
//! **Purpose:** Own one audio-playback handle and one persistent status
//! display, and transition between playback states (`Idle`, `Loading`,
//! `Playing`, `Paused`) in response to dispatched actions (`start`, `pause`,
//! `resume`, `stop`). Every transition calls into the audio backend and
//! rebuilds the status display.
//!
//! **Architecture:** Single-threaded transition function hosted in one tokio
//! task. The audio backend and the display service are injected capabilities
//! ([`AudioBackend`], [`StatusDisplay`]); backend readiness and completion
//! arrive asynchronously as [`BackendEvent`]s on an mpsc channel, and state
//! transitions are observable via a broadcast [`EventBus`].

pub mod action;
pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod player;
pub mod state;

pub use action::Action;
pub use backend::{AudioBackend, BackendEvent};
pub use config::PlayerConfig;
pub use display::{ActionButton, Icon, StatusContent, StatusDisplay};
pub use error::{Error, Result};
pub use events::{EventBus, PlayerEvent};
pub use player::{PlaybackController, PlayerService};
pub use state::PlayerState;
