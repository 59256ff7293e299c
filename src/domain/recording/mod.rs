//! Recording domain: session lifecycle, buffering, markers, artifacts

pub mod amplitude;
pub mod artifact;
pub mod buffer;
pub mod marker;
pub mod session;

pub use amplitude::{block_level, LIVE_GAIN, OVERVIEW_GAIN};
pub use artifact::{RecordingArtifact, BITS_PER_SAMPLE, CHANNEL_COUNT};
pub use buffer::CaptureBuffer;
pub use marker::{relabel_in, Marker, MarkerLedger};
pub use session::{RecorderSession, RecorderState, SessionSummary, TICK_MS};
