//! Record-session use case
//!
//! Orchestrates the capture device, the recorder session state machine,
//! and the shared capture buffer. The control surface (start, pause,
//! resume, add_marker, stop, abort) runs in the control context; the
//! capture adapter invokes the block sink from the producer context.
//!
//! Cross-context state is limited to the buffer mutex (append-only from
//! the producer, drained once after release) and an atomic cell carrying
//! the latest live level for the presenter.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration as TokioDuration};

use crate::domain::recording::{
    block_level, CaptureBuffer, Marker, RecorderSession, RecorderState, RecordingArtifact,
    LIVE_GAIN, OVERVIEW_GAIN, TICK_MS,
};

use super::ports::{BlockSink, CaptureDevice, CaptureError};

/// Errors from the record-session use case
#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error("Recording failed to start: {0}")]
    Capture(#[from] CaptureError),
}

/// Record-session use case.
///
/// Generic over the capture port so tests can drive it with an in-memory
/// device. One instance supports any number of consecutive sessions, but
/// at most one at a time.
pub struct RecordSessionUseCase<C: CaptureDevice> {
    capture: C,
    session: Arc<StdMutex<RecorderSession>>,
    buffer: Arc<StdMutex<CaptureBuffer>>,
    /// Latest live-feed level, stored as f32 bits
    live_level: Arc<AtomicU32>,
    live_gain: f32,
    overview_gain: f32,
    tick_task: StdMutex<Option<JoinHandle<()>>>,
}

impl<C: CaptureDevice> RecordSessionUseCase<C> {
    /// Create a use case with the default feed gains
    pub fn new(capture: C) -> Self {
        Self::with_gains(capture, LIVE_GAIN, OVERVIEW_GAIN)
    }

    /// Create a use case with configured feed gains
    pub fn with_gains(capture: C, live_gain: f32, overview_gain: f32) -> Self {
        Self {
            capture,
            session: Arc::new(StdMutex::new(RecorderSession::new())),
            buffer: Arc::new(StdMutex::new(CaptureBuffer::with_gain(overview_gain))),
            live_level: Arc::new(AtomicU32::new(0)),
            live_gain,
            overview_gain,
            tick_task: StdMutex::new(None),
        }
    }

    /// Start a new session: acquire the device, reset session data, begin
    /// routing blocks, and start the elapsed-time tick.
    ///
    /// A start while a session is active is a no-op. On device failure the
    /// session stays idle and the error is returned; the caller may simply
    /// retry.
    pub async fn start(&self) -> Result<(), RecordError> {
        if !self.session.lock().unwrap().is_idle() {
            return Ok(());
        }

        // Fresh buffer for the new session
        *self.buffer.lock().unwrap() = CaptureBuffer::with_gain(self.overview_gain);
        self.live_level.store(0, Ordering::Relaxed);

        let buffer = Arc::clone(&self.buffer);
        let live_level = Arc::clone(&self.live_level);
        let live_gain = self.live_gain;
        let sink: BlockSink = Arc::new(move |block: &[f32]| {
            live_level.store(block_level(block, live_gain).to_bits(), Ordering::Relaxed);
            if let Ok(mut buf) = buffer.lock() {
                buf.push_block(block);
            }
        });

        let sample_rate = self.capture.acquire(sink).await?;
        self.session.lock().unwrap().begin(sample_rate);

        // Tick task: advance the session clock at a fixed cadence until the
        // session goes idle. The session itself ignores ticks while paused.
        let session = Arc::clone(&self.session);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(TokioDuration::from_millis(TICK_MS));
            // The first tick of a tokio interval fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let mut guard = session.lock().unwrap();
                if guard.is_idle() {
                    break;
                }
                guard.tick(TICK_MS);
            }
        });
        *self.tick_task.lock().unwrap() = Some(handle);

        Ok(())
    }

    /// Pause the session, freezing the clock and suspending the producer.
    /// No-op unless currently recording.
    pub fn pause(&self) {
        if self.session.lock().unwrap().pause() {
            self.capture.suspend();
        }
    }

    /// Resume a paused session. No-op unless currently paused.
    pub fn resume(&self) {
        if self.session.lock().unwrap().resume() {
            self.capture.resume();
        }
    }

    /// Add a marker at the current elapsed time.
    /// Returns the created marker, or None while idle.
    pub fn add_marker(&self) -> Option<Marker> {
        self.session.lock().unwrap().add_marker()
    }

    /// Stop the session and produce the finalized artifact.
    ///
    /// Releases the device first so no producer append can race the drain,
    /// then flattens the buffer and combines it with the session summary.
    /// Returns None when no session is active.
    pub async fn stop(&self) -> Option<RecordingArtifact> {
        if self.session.lock().unwrap().is_idle() {
            return None;
        }

        // Disable-then-drain: release() only returns once the producer
        // context is gone.
        self.capture.release().await;
        self.stop_tick();

        let summary = self.session.lock().unwrap().finish()?;
        let buffer = std::mem::take(&mut *self.buffer.lock().unwrap());
        let (samples, overview) = buffer.flatten();
        self.live_level.store(0, Ordering::Relaxed);

        Some(RecordingArtifact {
            sample_rate: summary.sample_rate,
            duration_secs: summary.duration_secs,
            samples,
            overview,
            markers: summary.markers,
        })
    }

    /// Abort the session, discarding all captured data. Safe while idle.
    pub async fn abort(&self) {
        self.capture.release().await;
        self.stop_tick();
        self.session.lock().unwrap().abort();
        self.buffer.lock().unwrap().clear();
        self.live_level.store(0, Ordering::Relaxed);
    }

    fn stop_tick(&self) {
        if let Some(handle) = self.tick_task.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Current state
    pub fn state(&self) -> RecorderState {
        self.session.lock().unwrap().state()
    }

    /// Tick-based elapsed time of the active session, in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.session.lock().unwrap().elapsed_secs()
    }

    /// Markers created so far in the active session
    pub fn markers_snapshot(&self) -> Vec<Marker> {
        self.session.lock().unwrap().markers().to_vec()
    }

    /// Number of markers in the active session
    pub fn marker_count(&self) -> usize {
        self.session.lock().unwrap().markers().len()
    }

    /// Latest live-feed level in [0, 1]
    pub fn live_level(&self) -> f32 {
        f32::from_bits(self.live_level.load(Ordering::Relaxed))
    }

    /// Snapshot of the per-block overview history
    pub fn overview_snapshot(&self) -> Vec<f32> {
        self.buffer.lock().unwrap().overview().to_vec()
    }
}
