//! Recording store port interface

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::recording::{Marker, RecordingArtifact};

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(String),

    #[error("Store index is corrupt: {0}")]
    Corrupt(String),

    #[error("No recording with id '{0}'")]
    NotFound(String),
}

/// Metadata of a saved recording, as kept in the library index.
///
/// The WAV bytes live next to the index on disk; this record carries
/// everything needed to list, play, and relabel without decoding audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecording {
    /// Library-unique id
    pub id: String,
    /// User-facing name
    pub name: String,
    /// Recording duration in seconds
    pub duration_secs: f64,
    /// Creation time, unix milliseconds
    pub created_at_ms: u64,
    /// Capture sample rate in Hz
    pub sample_rate: u32,
    /// Markers in creation order; labels are editable here
    pub markers: Vec<Marker>,
    /// Path of the WAV file
    pub path: PathBuf,
}

/// Mutable fields of a stored recording.
///
/// Identity (id, audio, times) never changes after save; only the name and
/// marker labels do. Relabel entries naming unknown marker ids are ignored.
#[derive(Debug, Clone, Default)]
pub struct RecordingUpdate {
    pub name: Option<String>,
    pub marker_labels: Vec<(u32, String)>,
}

/// Port for the recording library (keyed blob store)
#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Persist a finalized artifact under the given name.
    async fn save(
        &self,
        artifact: &RecordingArtifact,
        name: &str,
    ) -> Result<StoredRecording, StoreError>;

    /// Load all stored recordings, newest first.
    async fn load_all(&self) -> Result<Vec<StoredRecording>, StoreError>;

    /// Apply an update to a stored recording.
    ///
    /// Unknown recording ids fail with [`StoreError::NotFound`]; unknown
    /// marker ids inside the update are silently skipped.
    async fn update(&self, id: &str, update: RecordingUpdate) -> Result<(), StoreError>;

    /// Delete one stored recording and its WAV file.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Delete every stored recording.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
