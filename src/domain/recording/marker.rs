//! Marker value object and session marker ledger

use serde::{Deserialize, Serialize};

/// A time-stamped annotation inside a recording.
///
/// The id is unique within its session and never changes; the label can be
/// edited after the recording has been finalized and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Sequential id, 1-based, assigned at creation
    pub id: u32,
    /// Elapsed session time at creation, in seconds
    pub time_secs: f64,
    /// Free-form label, defaults to "Marker N"
    pub label: String,
}

/// Ordered list of markers for one session.
///
/// Append-only while capturing; labels become editable once the session is
/// finalized and the markers are handed to the store. Ids and default labels
/// are frozen at creation time and never renumbered.
#[derive(Debug, Clone, Default)]
pub struct MarkerLedger {
    markers: Vec<Marker>,
}

impl MarkerLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker at the given elapsed time.
    ///
    /// The label defaults to `"Marker N"` where N is the 1-based position
    /// at creation time.
    pub fn add(&mut self, time_secs: f64) -> &Marker {
        let count = self.markers.len() as u32 + 1;
        self.markers.push(Marker {
            id: count,
            time_secs,
            label: format!("Marker {}", count),
        });
        self.markers.last().unwrap()
    }

    /// Change the label of an existing marker.
    ///
    /// Relabeling an unknown id is a no-op; returns whether a marker matched.
    pub fn relabel(&mut self, id: u32, label: &str) -> bool {
        match self.markers.iter_mut().find(|m| m.id == id) {
            Some(marker) => {
                marker.label = label.to_string();
                true
            }
            None => false,
        }
    }

    /// Number of markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in creation order
    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    /// Consume the ledger, returning the markers in creation order
    pub fn into_vec(self) -> Vec<Marker> {
        self.markers
    }

    /// Remove all markers
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

/// Relabel a marker inside a stored marker list; unknown ids are a no-op.
///
/// Used by the persistence layer, which holds plain `Vec<Marker>` rather
/// than a live ledger.
pub fn relabel_in(markers: &mut [Marker], id: u32, label: &str) -> bool {
    match markers.iter_mut().find(|m| m.id == id) {
        Some(marker) => {
            marker.label = label.to_string();
            true
        }
        None => false,
    }
}
