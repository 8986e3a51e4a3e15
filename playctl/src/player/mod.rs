//! Playback controller and its hosting task

pub mod controller;
pub mod service;

pub use controller::PlaybackController;
pub use service::PlayerService;
