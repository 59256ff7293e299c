//! Filesystem recording store
//!
//! Keeps the library under one directory: `index.json` with the metadata
//! of every saved recording plus one `<id>.wav` file per recording.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{RecordingStore, RecordingUpdate, StoreError, StoredRecording};
use crate::domain::recording::{relabel_in, RecordingArtifact};

const INDEX_FILE: &str = "index.json";

/// Recording store rooted in a directory (XDG data dir by default)
pub struct FsRecordingStore {
    root: PathBuf,
}

impl FsRecordingStore {
    /// Create a store in the default library location
    pub fn new() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("wavemark");
        Self { root }
    }

    /// Create a store rooted at a custom directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Library root directory
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn wav_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.wav", id))
    }

    async fn read_index(&self) -> Result<Vec<StoredRecording>, StoreError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn write_index(&self, records: &[StoredRecording]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let content =
            serde_json::to_string_pretty(records).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        fs::write(self.index_path(), content)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    /// Current unix time in milliseconds
    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Pick an id unique within the index (creation millis, bumped on the
    /// rare collision)
    fn unique_id(records: &[StoredRecording], created_at_ms: u64) -> String {
        let mut candidate = created_at_ms;
        while records.iter().any(|r| r.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl Default for FsRecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordingStore for FsRecordingStore {
    async fn save(
        &self,
        artifact: &RecordingArtifact,
        name: &str,
    ) -> Result<StoredRecording, StoreError> {
        let mut records = self.read_index().await?;
        let created_at_ms = Self::now_ms();
        let id = Self::unique_id(&records, created_at_ms);
        let path = self.wav_path(&id);

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(&path, artifact.to_wav())
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let record = StoredRecording {
            id,
            name: name.to_string(),
            duration_secs: artifact.duration_secs,
            created_at_ms,
            sample_rate: artifact.sample_rate,
            markers: artifact.markers.clone(),
            path,
        };

        // Newest first, matching the library listing order
        records.insert(0, record.clone());
        self.write_index(&records).await?;

        Ok(record)
    }

    async fn load_all(&self) -> Result<Vec<StoredRecording>, StoreError> {
        self.read_index().await
    }

    async fn update(&self, id: &str, update: RecordingUpdate) -> Result<(), StoreError> {
        let mut records = self.read_index().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(name) = update.name {
            record.name = name;
        }
        for (marker_id, label) in &update.marker_labels {
            // Unknown marker ids are skipped, not errors
            relabel_in(&mut record.markers, *marker_id, label);
        }

        self.write_index(&records).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.read_index().await?;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let record = records.remove(position);
        match fs::remove_file(&record.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::Io(e.to_string())),
        }

        self.write_index(&records).await
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let records = self.read_index().await?;
        for record in &records {
            match fs::remove_file(&record.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::Io(e.to_string())),
            }
        }
        self.write_index(&[]).await
    }
}
