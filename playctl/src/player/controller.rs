//! Playback state machine
//!
//! Single-threaded transition function over the four dispatched actions and
//! the asynchronous backend reports. All methods run on the hosting task;
//! nothing here is locked or shared.
//!
//! Failed guard conditions (pause while not playing, stop with no session)
//! are silent no-ops logged at debug level. A backend that fails to produce
//! a handle is logged at error level and the controller stays idle; there is
//! no retry and no user-visible error surface beyond the logs.

use std::path::PathBuf;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::action::Action;
use crate::backend::{AudioBackend, BackendEvent};
use crate::display::{StatusContent, StatusDisplay};
use crate::events::{EventBus, PlayerEvent};
use crate::state::{Phase, PlaybackSession, PlayerState};

/// Playback controller
///
/// Owns the audio backend, the status display, and the single live session.
/// Transitions are driven by [`dispatch`](Self::dispatch) for user actions
/// and [`handle_backend_event`](Self::handle_backend_event) for backend
/// reports.
pub struct PlaybackController<B: AudioBackend, D: StatusDisplay> {
    backend: B,
    display: D,

    /// Audio resource loaded on every start
    source: PathBuf,

    /// The single live session, None while idle
    session: Option<PlaybackSession<B::Handle>>,

    /// Last computed display content, reposted on every dispatch entry
    last_status: StatusContent,

    /// Handed to the backend at load time for readiness reports
    backend_tx: mpsc::Sender<BackendEvent>,

    events: EventBus,
}

impl<B: AudioBackend, D: StatusDisplay> PlaybackController<B, D> {
    pub fn new(
        backend: B,
        display: D,
        source: PathBuf,
        backend_tx: mpsc::Sender<BackendEvent>,
        events: EventBus,
    ) -> Self {
        Self {
            backend,
            display,
            source,
            session: None,
            last_status: StatusContent::preparing(),
            backend_tx,
            events,
        }
    }

    /// Current observable state, derived from the live session
    pub fn state(&self) -> PlayerState {
        self.session
            .as_ref()
            .map(PlaybackSession::state)
            .unwrap_or(PlayerState::Idle)
    }

    /// Last computed display content
    pub fn last_status(&self) -> &StatusContent {
        &self.last_status
    }

    /// Dispatch a raw action string
    ///
    /// Unknown strings do not transition, but the display is still reposted
    /// with its last-known content.
    pub fn dispatch_raw(&mut self, raw: &str) {
        match raw.parse::<Action>() {
            Ok(action) => self.dispatch(action),
            Err(unknown) => {
                warn!("Ignoring unknown action {:?}", unknown.0);
                self.repost();
            }
        }
    }

    /// Dispatch one action
    ///
    /// The display is reposted with the last computed content before the
    /// transition runs, so a stale or placeholder status may show briefly
    /// while a start is still loading.
    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatching action {} in state {}", action, self.state());
        self.repost();

        match action {
            Action::Start => self.start(),
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::Stop => self.stop(false),
        }
    }

    /// Apply an asynchronous backend report
    ///
    /// Reports for a session that is no longer live are discarded; this is
    /// what makes a stop before the ready report safe.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match self.session.as_ref() {
            Some(session) if session.id == event.session_id() => {}
            _ => {
                debug!("Discarding backend report for stale session: {:?}", event);
                return;
            }
        }

        match event {
            BackendEvent::Ready { .. } => self.on_ready(),
            BackendEvent::Completed { .. } => self.on_completed(),
            BackendEvent::LoadFailed { reason, .. } => self.on_load_failed(&reason),
        }
    }

    /// Release any live handle. Called on host teardown; the display entry
    /// is left to the host to clear.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("Releasing session {} on shutdown", session.id);
            self.backend.release(session.handle);
        }
    }

    fn start(&mut self) {
        let old_state = self.state();

        if let Some(session) = self.session.take() {
            debug!("Releasing previous session {}", session.id);
            self.backend.release(session.handle);
        }

        let session_id = Uuid::new_v4();
        match self
            .backend
            .load(&self.source, session_id, self.backend_tx.clone())
        {
            Ok(handle) => {
                self.session = Some(PlaybackSession::new(session_id, handle));
                self.set_status(StatusContent::preparing());
                self.events.emit_lossy(PlayerEvent::SessionStarted {
                    session_id,
                    timestamp: Utc::now(),
                });
                self.note_state_change(old_state);
                info!(
                    "Session {} loading {}",
                    session_id,
                    self.source.display()
                );
            }
            Err(e) => {
                // Transition aborted, no retry
                error!("Failed to load audio source: {}", e);
                self.note_state_change(old_state);
            }
        }
    }

    fn pause(&mut self) {
        let old_state = self.state();
        let Some(session) = self.session.as_mut() else {
            debug!("Pause ignored: no active session");
            return;
        };
        if session.phase != Phase::Ready || !self.backend.is_playing(&session.handle) {
            debug!("Pause ignored in state {}", old_state);
            return;
        }

        if let Err(e) = self.backend.pause(&mut session.handle) {
            warn!("Backend pause failed: {}", e);
            return;
        }
        session.paused = true;

        self.set_status(StatusContent::paused());
        self.note_state_change(old_state);
        info!("Playback paused");
    }

    fn resume(&mut self) {
        let old_state = self.state();
        let Some(session) = self.session.as_mut() else {
            debug!("Resume ignored: no active session");
            return;
        };
        if session.phase != Phase::Ready || !session.paused {
            debug!("Resume ignored in state {}", old_state);
            return;
        }

        if let Err(e) = self.backend.resume(&mut session.handle) {
            warn!("Backend resume failed: {}", e);
            return;
        }
        session.paused = false;

        self.set_status(StatusContent::playing());
        self.note_state_change(old_state);
        info!("Playback resumed");
    }

    fn stop(&mut self, completed: bool) {
        let old_state = self.state();
        let Some(mut session) = self.session.take() else {
            debug!("Stop ignored: no active session");
            return;
        };

        // A handle that never reported ready must not be operated on
        if session.phase == Phase::Ready {
            if let Err(e) = self.backend.stop(&mut session.handle) {
                warn!("Backend stop failed: {}", e);
            }
        }

        let session_id = session.id;
        self.backend.release(session.handle);
        self.remove_display();
        self.last_status = StatusContent::preparing();

        self.events.emit_lossy(PlayerEvent::SessionEnded {
            session_id,
            completed,
            timestamp: Utc::now(),
        });
        self.note_state_change(old_state);
        info!("Playback stopped, session {} released", session_id);
    }

    fn on_ready(&mut self) {
        let old_state = self.state();
        let play_result = match self.session.as_mut() {
            Some(session) if session.phase == Phase::Loading => {
                self.backend.play(&mut session.handle)
            }
            _ => {
                debug!("Duplicate ready report ignored");
                return;
            }
        };

        match play_result {
            Ok(()) => {
                if let Some(session) = self.session.as_mut() {
                    session.phase = Phase::Ready;
                    session.paused = false;
                }
                self.set_status(StatusContent::playing());
                self.note_state_change(old_state);
                info!("Playback started");
            }
            Err(e) => {
                error!("Failed to start playback: {}", e);
                if let Some(session) = self.session.take() {
                    self.backend.release(session.handle);
                }
                self.note_state_change(old_state);
            }
        }
    }

    fn on_completed(&mut self) {
        if self.state() != PlayerState::Playing {
            debug!("Completion report ignored in state {}", self.state());
            return;
        }

        // Completion behaves identically to an explicit stop
        self.stop(true);
    }

    fn on_load_failed(&mut self, reason: &str) {
        let old_state = self.state();
        error!("Audio source failed to prepare: {}", reason);

        if let Some(session) = self.session.take() {
            self.backend.release(session.handle);
        }
        self.note_state_change(old_state);
    }

    fn set_status(&mut self, content: StatusContent) {
        if let Err(e) = self.display.post(&content) {
            warn!("Failed to post status display: {}", e);
        }
        self.events.emit_lossy(PlayerEvent::DisplayUpdated {
            body: content.body.to_string(),
            timestamp: Utc::now(),
        });
        self.last_status = content;
    }

    fn repost(&mut self) {
        if let Err(e) = self.display.post(&self.last_status) {
            warn!("Failed to repost status display: {}", e);
        }
    }

    fn remove_display(&mut self) {
        if let Err(e) = self.display.remove() {
            warn!("Failed to remove status display: {}", e);
        }
        self.events.emit_lossy(PlayerEvent::DisplayRemoved {
            timestamp: Utc::now(),
        });
    }

    fn note_state_change(&mut self, old_state: PlayerState) {
        let new_state = self.state();
        if new_state != old_state {
            info!("Playback state changed: {} -> {}", old_state, new_state);
            self.events.emit_lossy(PlayerEvent::StateChanged {
                old_state,
                new_state,
                timestamp: Utc::now(),
            });
        }
    }
}
