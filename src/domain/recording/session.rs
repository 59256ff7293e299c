//! Recorder session state machine

use std::fmt;

use super::marker::{Marker, MarkerLedger};

/// Fixed period of the elapsed-time tick, in milliseconds
pub const TICK_MS: u64 = 100;

/// Recorder states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Paused,
}

impl RecorderState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Control-plane summary handed out when a session finishes.
///
/// The audio itself travels separately through the capture buffer; this
/// carries everything else the artifact needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub markers: Vec<Marker>,
}

/// Recorder session entity.
///
/// Owns the elapsed-time clock and the marker ledger for one take and
/// enforces the session lifecycle:
///
/// ```text
///   IDLE -> RECORDING            (begin)
///   RECORDING <-> PAUSED         (pause / resume)
///   RECORDING | PAUSED -> IDLE   (finish / abort)
/// ```
///
/// Out-of-context control calls are deliberate no-ops rather than errors:
/// pausing while idle, resuming while recording, or adding a marker before
/// a session exists all leave the session untouched.
///
/// The elapsed clock only advances through [`tick`](Self::tick) while the
/// state is `Recording`; pausing freezes it without resetting it. Marker
/// times are read from this clock, so cue positions derived from them track
/// the tick cadence rather than the exact sample count (a known, bounded
/// imprecision between the two time bases).
#[derive(Debug, Default)]
pub struct RecorderSession {
    state: RecorderState,
    elapsed_ms: u64,
    sample_rate: u32,
    markers: MarkerLedger,
}

impl RecorderSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == RecorderState::Idle
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Check if currently paused
    pub fn is_paused(&self) -> bool {
        self.state == RecorderState::Paused
    }

    /// Elapsed session time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Elapsed session time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }

    /// Capture sample rate of the active session (0 while idle)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Markers created so far, in creation order
    pub fn markers(&self) -> &[Marker] {
        self.markers.as_slice()
    }

    /// Start a session: IDLE -> RECORDING.
    ///
    /// Clears any prior markers and resets the clock. Returns false (and
    /// changes nothing) when a session is already active.
    pub fn begin(&mut self, sample_rate: u32) -> bool {
        if self.state != RecorderState::Idle {
            return false;
        }
        self.state = RecorderState::Recording;
        self.elapsed_ms = 0;
        self.sample_rate = sample_rate;
        self.markers.clear();
        true
    }

    /// Advance the elapsed clock by one tick period.
    ///
    /// Only has an effect while recording; the clock is frozen while paused
    /// and does not exist while idle.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.state == RecorderState::Recording {
            self.elapsed_ms += delta_ms;
        }
    }

    /// RECORDING -> PAUSED. Returns whether a transition happened.
    pub fn pause(&mut self) -> bool {
        if self.state != RecorderState::Recording {
            return false;
        }
        self.state = RecorderState::Paused;
        true
    }

    /// PAUSED -> RECORDING, continuing from the frozen clock.
    /// Returns whether a transition happened.
    pub fn resume(&mut self) -> bool {
        if self.state != RecorderState::Paused {
            return false;
        }
        self.state = RecorderState::Recording;
        true
    }

    /// Add a marker at the current elapsed time.
    ///
    /// Valid while recording or paused; silently ignored while idle.
    pub fn add_marker(&mut self) -> Option<Marker> {
        if self.state == RecorderState::Idle {
            return None;
        }
        Some(self.markers.add(self.elapsed_secs()).clone())
    }

    /// Finish the session: RECORDING | PAUSED -> IDLE.
    ///
    /// Returns the session summary, or None when called while idle.
    pub fn finish(&mut self) -> Option<SessionSummary> {
        if self.state == RecorderState::Idle {
            return None;
        }
        let summary = SessionSummary {
            sample_rate: self.sample_rate,
            duration_secs: self.elapsed_secs(),
            markers: std::mem::take(&mut self.markers).into_vec(),
        };
        self.state = RecorderState::Idle;
        self.elapsed_ms = 0;
        self.sample_rate = 0;
        Some(summary)
    }

    /// Discard the session: any state -> IDLE, no summary
    pub fn abort(&mut self) {
        self.state = RecorderState::Idle;
        self.elapsed_ms = 0;
        self.sample_rate = 0;
        self.markers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = RecorderSession::new();
        assert!(session.is_idle());
        assert!(!session.is_recording());
        assert!(!session.is_paused());
        assert_eq!(session.elapsed_ms(), 0);
    }

    #[test]
    fn begin_from_idle() {
        let mut session = RecorderSession::new();
        assert!(session.begin(48000));
        assert!(session.is_recording());
        assert_eq!(session.sample_rate(), 48000);
    }

    #[test]
    fn begin_while_active_is_noop() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(500);

        assert!(!session.begin(44100));
        assert_eq!(session.sample_rate(), 48000);
        assert_eq!(session.elapsed_ms(), 500);
    }

    #[test]
    fn begin_clears_prior_session_data() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(1000);
        session.add_marker();
        session.finish();

        session.begin(44100);
        assert_eq!(session.elapsed_ms(), 0);
        assert!(session.markers().is_empty());
    }

    #[test]
    fn tick_advances_only_while_recording() {
        let mut session = RecorderSession::new();
        session.tick(100);
        assert_eq!(session.elapsed_ms(), 0);

        session.begin(48000);
        session.tick(100);
        session.tick(100);
        assert_eq!(session.elapsed_ms(), 200);

        session.pause();
        session.tick(100);
        assert_eq!(session.elapsed_ms(), 200);
    }

    #[test]
    fn pause_and_resume_keep_elapsed_time() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(300);

        assert!(session.pause());
        assert!(session.is_paused());
        assert_eq!(session.elapsed_ms(), 300);

        assert!(session.resume());
        assert!(session.is_recording());
        session.tick(100);
        assert_eq!(session.elapsed_ms(), 400);
    }

    #[test]
    fn pause_is_idempotent_safe() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        assert!(session.pause());
        assert!(!session.pause());
        assert!(session.is_paused());
    }

    #[test]
    fn resume_while_recording_is_noop() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        assert!(!session.resume());
        assert!(session.is_recording());
    }

    #[test]
    fn pause_from_idle_is_noop() {
        let mut session = RecorderSession::new();
        assert!(!session.pause());
        assert!(!session.resume());
        assert!(session.is_idle());
    }

    #[test]
    fn add_marker_from_idle_is_noop() {
        let mut session = RecorderSession::new();
        assert!(session.add_marker().is_none());
    }

    #[test]
    fn add_marker_captures_elapsed_time() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(2000);

        let marker = session.add_marker().unwrap();
        assert!((marker.time_secs - 2.0).abs() < f64::EPSILON);
        assert_eq!(marker.label, "Marker 1");
    }

    #[test]
    fn markers_number_across_pause_and_resume() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.add_marker();
        session.pause();
        let paused_marker = session.add_marker().unwrap();
        session.resume();
        let third = session.add_marker().unwrap();

        assert_eq!(paused_marker.label, "Marker 2");
        assert_eq!(third.label, "Marker 3");
    }

    #[test]
    fn finish_from_idle_is_none() {
        let mut session = RecorderSession::new();
        assert!(session.finish().is_none());
    }

    #[test]
    fn finish_yields_summary_and_returns_to_idle() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(2000);
        session.add_marker();
        session.tick(1000);

        let summary = session.finish().unwrap();
        assert!(session.is_idle());
        assert_eq!(summary.sample_rate, 48000);
        assert!((summary.duration_secs - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.markers.len(), 1);
        assert!((summary.markers[0].time_secs - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn finish_while_paused_freezes_duration() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(1500);
        session.pause();

        let summary = session.finish().unwrap();
        assert!((summary.duration_secs - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn marker_times_never_exceed_final_duration() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(700);
        session.add_marker();
        session.tick(300);
        session.add_marker();

        let summary = session.finish().unwrap();
        for marker in &summary.markers {
            assert!(marker.time_secs >= 0.0);
            assert!(marker.time_secs <= summary.duration_secs);
        }
    }

    #[test]
    fn abort_discards_session() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(1000);
        session.add_marker();

        session.abort();
        assert!(session.is_idle());
        assert_eq!(session.elapsed_ms(), 0);
        assert!(session.markers().is_empty());
    }

    #[test]
    fn can_run_consecutive_sessions() {
        let mut session = RecorderSession::new();
        session.begin(48000);
        session.tick(500);
        session.finish().unwrap();

        assert!(session.begin(48000));
        assert_eq!(session.elapsed_ms(), 0);
    }

    #[test]
    fn state_display() {
        assert_eq!(RecorderState::Idle.to_string(), "idle");
        assert_eq!(RecorderState::Recording.to_string(), "recording");
        assert_eq!(RecorderState::Paused.to_string(), "paused");
    }
}
