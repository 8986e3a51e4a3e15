//! Audio backend capability
//!
//! The platform service that decodes and plays audio is consumed through
//! this trait, never reimplemented. Loading is two-phase: `load` acquires a
//! handle and starts an asynchronous prepare; readiness arrives later as a
//! [`BackendEvent::Ready`] on the channel handed to `load`.

use std::path::Path;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::Result;

/// Asynchronous reports from the backend to the controller
///
/// Every report carries the id of the session its handle belongs to. The
/// controller discards reports whose session is no longer live, so a handle
/// released before its prepare finished can never be operated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// The loaded resource finished preparing and can be played
    Ready { session_id: Uuid },

    /// Playback reached the end of the resource
    Completed { session_id: Uuid },

    /// The resource could not be prepared after `load` returned
    LoadFailed { session_id: Uuid, reason: String },
}

impl BackendEvent {
    /// Session this report belongs to
    pub fn session_id(&self) -> Uuid {
        match self {
            BackendEvent::Ready { session_id }
            | BackendEvent::Completed { session_id }
            | BackendEvent::LoadFailed { session_id, .. } => *session_id,
        }
    }
}

/// Capability for the platform audio service
///
/// `play`, `pause`, `resume` and `stop` must only be called on a handle whose
/// session has received [`BackendEvent::Ready`]; the controller enforces
/// this. `release` consumes the handle and is always safe, regardless of
/// readiness phase.
pub trait AudioBackend: Send + 'static {
    /// Opaque playback resource, exclusively owned by the controller
    type Handle: Send;

    /// Acquire a handle for `source` and begin the asynchronous prepare.
    ///
    /// Readiness, completion and late failures are reported on `events`,
    /// tagged with `session_id`. A synchronous failure (resource
    /// unavailable, decode error) is returned directly.
    fn load(
        &mut self,
        source: &Path,
        session_id: Uuid,
        events: mpsc::Sender<BackendEvent>,
    ) -> Result<Self::Handle>;

    /// Begin playback on a ready handle
    fn play(&mut self, handle: &mut Self::Handle) -> Result<()>;

    /// Suspend playback
    fn pause(&mut self, handle: &mut Self::Handle) -> Result<()>;

    /// Continue playback after a pause
    fn resume(&mut self, handle: &mut Self::Handle) -> Result<()>;

    /// Halt playback
    fn stop(&mut self, handle: &mut Self::Handle) -> Result<()>;

    /// Whether the handle is currently producing audio
    fn is_playing(&self, handle: &Self::Handle) -> bool;

    /// Release the handle and all backend resources behind it
    fn release(&mut self, handle: Self::Handle);
}
