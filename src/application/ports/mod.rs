//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod store;

// Re-export common types
pub use capture::{BlockSink, CaptureDevice, CaptureError};
pub use config::ConfigStore;
pub use store::{RecordingStore, RecordingUpdate, StoreError, StoredRecording};
