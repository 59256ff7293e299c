//! Domain layer - Core business logic
//!
//! Contains the recorder state machine, capture buffering, marker ledger,
//! WAV encoding, value objects, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod recording;
pub mod wav;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recording::{
    CaptureBuffer, Marker, MarkerLedger, RecorderSession, RecorderState, RecordingArtifact,
};
