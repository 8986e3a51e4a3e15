//! Recording mock capabilities for controller tests
//!
//! `MockBackend` and `MockDisplay` stand in for the platform audio and
//! display services. Each hands out a probe (shared call log) so tests can
//! verify exactly which backend operations and display updates a sequence of
//! actions produced, and fire ready/completion reports on demand.

use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use uuid::Uuid;

use playctl::{
    AudioBackend, BackendEvent, Error, PlayerEvent, PlayerState, Result, StatusContent,
    StatusDisplay,
};

/// One recorded backend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Load,
    Play,
    Pause,
    Resume,
    Stop,
    Release,
}

/// Shared view into a MockBackend's call log and observed loads
#[derive(Clone, Default)]
pub struct BackendProbe {
    calls: Arc<Mutex<Vec<BackendCall>>>,
    loads: Arc<Mutex<Vec<(Uuid, mpsc::Sender<BackendEvent>)>>>,
}

impl BackendProbe {
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: BackendCall) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    /// Session id of the most recent load, if any
    pub fn last_session(&self) -> Option<Uuid> {
        self.loads.lock().unwrap().last().map(|(id, _)| *id)
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn latest_load(&self) -> (Uuid, mpsc::Sender<BackendEvent>) {
        let deadline = Instant::now() + Duration::from_secs(1);
        loop {
            let entry = self.loads.lock().unwrap().last().cloned();
            if let Some(entry) = entry {
                return entry;
            }
            if Instant::now() >= deadline {
                panic!("no backend load observed within 1s");
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    /// Report the most recent load as ready, waiting for the load to be
    /// observed first (service tests race against the controller task)
    pub async fn fire_ready(&self) {
        let (session_id, tx) = self.latest_load().await;
        tx.send(BackendEvent::Ready { session_id })
            .await
            .expect("backend report channel closed");
    }

    /// Report end-of-resource for the most recent load
    pub async fn fire_completed(&self) {
        let (session_id, tx) = self.latest_load().await;
        tx.send(BackendEvent::Completed { session_id })
            .await
            .expect("backend report channel closed");
    }
}

/// Playback handle handed out by MockBackend
pub struct MockHandle {
    playing: bool,
}

/// Recording stand-in for the platform audio service
pub struct MockBackend {
    probe: BackendProbe,
    fail_load: bool,
}

impl MockBackend {
    pub fn new(fail_load: bool) -> (Self, BackendProbe) {
        let probe = BackendProbe::default();
        (
            Self {
                probe: probe.clone(),
                fail_load,
            },
            probe,
        )
    }
}

impl AudioBackend for MockBackend {
    type Handle = MockHandle;

    fn load(
        &mut self,
        _source: &Path,
        session_id: Uuid,
        events: mpsc::Sender<BackendEvent>,
    ) -> Result<MockHandle> {
        self.probe.record(BackendCall::Load);
        if self.fail_load {
            return Err(Error::Backend("resource unavailable".to_string()));
        }
        self.probe.loads.lock().unwrap().push((session_id, events));
        Ok(MockHandle { playing: false })
    }

    fn play(&mut self, handle: &mut MockHandle) -> Result<()> {
        self.probe.record(BackendCall::Play);
        handle.playing = true;
        Ok(())
    }

    fn pause(&mut self, handle: &mut MockHandle) -> Result<()> {
        self.probe.record(BackendCall::Pause);
        handle.playing = false;
        Ok(())
    }

    fn resume(&mut self, handle: &mut MockHandle) -> Result<()> {
        self.probe.record(BackendCall::Resume);
        handle.playing = true;
        Ok(())
    }

    fn stop(&mut self, handle: &mut MockHandle) -> Result<()> {
        self.probe.record(BackendCall::Stop);
        handle.playing = false;
        Ok(())
    }

    fn is_playing(&self, handle: &MockHandle) -> bool {
        handle.playing
    }

    fn release(&mut self, _handle: MockHandle) {
        self.probe.record(BackendCall::Release);
    }
}

/// Shared view into a MockDisplay's posted content
#[derive(Clone, Default)]
pub struct DisplayProbe {
    posts: Arc<Mutex<Vec<StatusContent>>>,
    removals: Arc<Mutex<usize>>,
}

impl DisplayProbe {
    pub fn posts(&self) -> Vec<StatusContent> {
        self.posts.lock().unwrap().clone()
    }

    pub fn last_post(&self) -> Option<StatusContent> {
        self.posts.lock().unwrap().last().cloned()
    }

    pub fn removals(&self) -> usize {
        *self.removals.lock().unwrap()
    }
}

/// Recording stand-in for the platform display service
pub struct MockDisplay {
    probe: DisplayProbe,
}

impl MockDisplay {
    pub fn new() -> (Self, DisplayProbe) {
        let probe = DisplayProbe::default();
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl StatusDisplay for MockDisplay {
    fn post(&mut self, content: &StatusContent) -> Result<()> {
        self.probe.posts.lock().unwrap().push(content.clone());
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        *self.probe.removals.lock().unwrap() += 1;
        Ok(())
    }
}

/// Receive events until a StateChanged into `expected` arrives
pub async fn await_state(rx: &mut broadcast::Receiver<PlayerEvent>, expected: PlayerState) {
    let deadline = Instant::now() + Duration::from_secs(1);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let event = tokio::time::timeout(remaining, rx.recv())
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for state {}", expected))
            .expect("event bus closed");
        if let PlayerEvent::StateChanged { new_state, .. } = event {
            if new_state == expected {
                return;
            }
        }
    }
}

/// Receive events until a SessionEnded arrives, returning its completed flag
pub async fn await_session_ended(rx: &mut broadcast::Receiver<PlayerEvent>) -> bool {
    let deadline = Instant::now() + Duration::from_secs(1);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let event = tokio::time::timeout(remaining, rx.recv())
            .await
            .expect("timed out waiting for session end")
            .expect("event bus closed");
        if let PlayerEvent::SessionEnded { completed, .. } = event {
            return completed;
        }
    }
}

static INIT: Once = Once::new();

/// Initialize test logging once per binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "playctl=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
