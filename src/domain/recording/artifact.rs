//! Finalized recording artifact

use super::marker::Marker;
use crate::domain::wav;

/// Channel count of every artifact (mono capture only)
pub const CHANNEL_COUNT: u16 = 1;

/// Bit depth of every artifact (16-bit PCM)
pub const BITS_PER_SAMPLE: u16 = 16;

/// Immutable result of a finished recording session.
///
/// Produced exactly once at `stop`; the session that produced it is gone by
/// the time the caller holds this value.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingArtifact {
    /// Capture sample rate in Hz
    pub sample_rate: u32,
    /// Tick-based session duration in seconds
    pub duration_secs: f64,
    /// All captured samples, flattened, in capture order
    pub samples: Vec<f32>,
    /// Per-block overview levels accumulated during capture
    pub overview: Vec<f32>,
    /// Markers in creation order
    pub markers: Vec<Marker>,
}

impl RecordingArtifact {
    /// Encode the artifact as a WAV byte stream with embedded cue points
    pub fn to_wav(&self) -> Vec<u8> {
        wav::encode(&self.samples, self.sample_rate, &self.markers)
    }

    /// Whether any audio was captured
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
