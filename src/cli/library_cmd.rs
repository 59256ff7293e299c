//! Library command handlers (list, rename, relabel, delete, clear, export)

use std::path::Path;

use crate::application::ports::{RecordingStore, RecordingUpdate, StoreError};

use super::presenter::{format_duration, Presenter};

/// Handle `wavemark list`
pub async fn handle_list<S: RecordingStore>(
    store: &S,
    presenter: &Presenter,
) -> Result<(), StoreError> {
    let recordings = store.load_all().await?;

    if recordings.is_empty() {
        presenter.info("No recordings yet. Run `wavemark` to record one.");
        return Ok(());
    }

    for rec in &recordings {
        presenter.output(&format!(
            "{}  {}  {}  {} marker(s)",
            rec.id,
            format_duration(rec.duration_secs),
            rec.name,
            rec.markers.len()
        ));
        for marker in &rec.markers {
            presenter.output(&format!(
                "    [{}] {}  {}",
                marker.id,
                format_duration(marker.time_secs),
                marker.label
            ));
        }
    }
    Ok(())
}

/// Handle `wavemark rename <id> <name>`
pub async fn handle_rename<S: RecordingStore>(
    store: &S,
    presenter: &Presenter,
    id: &str,
    name: &str,
) -> Result<(), StoreError> {
    store
        .update(
            id,
            RecordingUpdate {
                name: Some(name.to_string()),
                marker_labels: Vec::new(),
            },
        )
        .await?;
    presenter.success(&format!("Renamed {} to \"{}\"", id, name));
    Ok(())
}

/// Handle `wavemark relabel <id> <marker> <label>`
pub async fn handle_relabel<S: RecordingStore>(
    store: &S,
    presenter: &Presenter,
    id: &str,
    marker: u32,
    label: &str,
) -> Result<(), StoreError> {
    store
        .update(
            id,
            RecordingUpdate {
                name: None,
                marker_labels: vec![(marker, label.to_string())],
            },
        )
        .await?;
    presenter.success(&format!("Marker {} on {} = \"{}\"", marker, id, label));
    Ok(())
}

/// Handle `wavemark delete <id>`
pub async fn handle_delete<S: RecordingStore>(
    store: &S,
    presenter: &Presenter,
    id: &str,
) -> Result<(), StoreError> {
    store.delete(id).await?;
    presenter.success(&format!("Deleted {}", id));
    Ok(())
}

/// Handle `wavemark clear [--yes]`
pub async fn handle_clear<S: RecordingStore>(
    store: &S,
    presenter: &Presenter,
    yes: bool,
) -> Result<(), StoreError> {
    if !yes {
        presenter.warn("This deletes every saved recording. Re-run with --yes to confirm.");
        return Ok(());
    }

    store.clear_all().await?;
    presenter.success("Library cleared");
    Ok(())
}

/// Handle `wavemark export <id> <path>`
pub async fn handle_export<S: RecordingStore>(
    store: &S,
    presenter: &Presenter,
    id: &str,
    path: &Path,
) -> Result<(), StoreError> {
    let recordings = store.load_all().await?;
    let record = recordings
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    tokio::fs::copy(&record.path, path)
        .await
        .map_err(|e| StoreError::Io(e.to_string()))?;
    presenter.success(&format!("Exported {} to {}", record.name, path.display()));
    Ok(())
}
