//! Controller task hosting
//!
//! Spawns the playback controller into a single tokio task and feeds it from
//! two channels: dispatched actions and backend reports. The host runtime
//! guarantee of the original platform (dispatch and callbacks never run
//! concurrently) becomes the task's select loop.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::action::Action;
use crate::backend::AudioBackend;
use crate::config::PlayerConfig;
use crate::display::StatusDisplay;
use crate::error::{Error, Result};
use crate::events::{EventBus, PlayerEvent};
use crate::player::controller::PlaybackController;

/// Messages accepted by the controller task
#[derive(Debug)]
enum ServiceCommand {
    Action(Action),
    Raw(String),
    Shutdown,
}

/// Handle to a running playback controller task
///
/// Dropping the handle (or calling [`shutdown`](Self::shutdown)) stops the
/// task and releases any live backend handle.
pub struct PlayerService {
    commands: mpsc::Sender<ServiceCommand>,
    events: EventBus,
    task: JoinHandle<()>,
}

impl PlayerService {
    /// Spawn the controller into its own task
    pub fn spawn<B, D>(backend: B, display: D, config: &PlayerConfig) -> Self
    where
        B: AudioBackend,
        D: StatusDisplay,
    {
        let events = EventBus::new(config.event_capacity);
        let (command_tx, mut command_rx) = mpsc::channel(config.action_capacity);
        let (backend_tx, mut backend_rx) = mpsc::channel(config.action_capacity);

        let mut controller = PlaybackController::new(
            backend,
            display,
            config.source.clone(),
            backend_tx,
            events.clone(),
        );

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    command = command_rx.recv() => match command {
                        Some(ServiceCommand::Action(action)) => controller.dispatch(action),
                        Some(ServiceCommand::Raw(raw)) => controller.dispatch_raw(&raw),
                        // None: all senders dropped, host is gone
                        Some(ServiceCommand::Shutdown) | None => break,
                    },
                    // The controller holds a backend sender, so this branch
                    // never sees channel closure
                    Some(report) = backend_rx.recv() => {
                        controller.handle_backend_event(report);
                    }
                }
            }
            controller.shutdown();
            debug!("Controller task stopped");
        });

        info!("Player service started");
        Self {
            commands: command_tx,
            events,
            task,
        }
    }

    /// Dispatch one action to the controller
    pub async fn dispatch(&self, action: Action) -> Result<()> {
        self.commands
            .send(ServiceCommand::Action(action))
            .await
            .map_err(|_| Error::ChannelClosed("controller task is gone".to_string()))
    }

    /// Dispatch a raw action string
    ///
    /// Unknown strings are still delivered so the controller reposts the
    /// display with its last-known content.
    pub async fn dispatch_raw(&self, raw: impl Into<String>) -> Result<()> {
        self.commands
            .send(ServiceCommand::Raw(raw.into()))
            .await
            .map_err(|_| Error::ChannelClosed("controller task is gone".to_string()))
    }

    /// Subscribe to player events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// The broadcast bus carrying player events
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Stop the controller task, releasing any live backend handle
    pub async fn shutdown(self) -> Result<()> {
        self.commands
            .send(ServiceCommand::Shutdown)
            .await
            .map_err(|_| Error::ChannelClosed("controller task is gone".to_string()))?;
        self.task
            .await
            .map_err(|e| Error::ChannelClosed(format!("controller task panicked: {}", e)))
    }
}
