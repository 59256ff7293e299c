//! Capture buffer: sample blocks plus the parallel overview history

use super::amplitude::{block_level, OVERVIEW_GAIN};

/// Growing list of captured sample blocks with one overview level per block.
///
/// Append-only while a session is recording; flattened exactly once at stop.
/// The producer side only ever appends, so each append is O(block) and the
/// single flatten is O(total samples).
#[derive(Debug)]
pub struct CaptureBuffer {
    blocks: Vec<Vec<f32>>,
    overview: Vec<f32>,
    overview_gain: f32,
}

impl CaptureBuffer {
    /// Create an empty buffer with the default overview gain
    pub fn new() -> Self {
        Self::with_gain(OVERVIEW_GAIN)
    }

    /// Create an empty buffer with a custom overview gain
    pub fn with_gain(overview_gain: f32) -> Self {
        Self {
            blocks: Vec::new(),
            overview: Vec::new(),
            overview_gain,
        }
    }

    /// Append one block of samples and record its overview level.
    ///
    /// Blocks are kept in delivery order; nothing is dropped or reordered.
    pub fn push_block(&mut self, block: &[f32]) {
        self.overview.push(block_level(block, self.overview_gain));
        self.blocks.push(block.to_vec());
    }

    /// Number of appended blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total number of buffered samples
    pub fn sample_count(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }

    /// Per-block overview levels, one per appended block
    pub fn overview(&self) -> &[f32] {
        &self.overview
    }

    /// Discard all buffered data
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.overview.clear();
    }

    /// Flatten all blocks into one contiguous sample sequence.
    ///
    /// Consumes the buffer; returns the samples and the overview history.
    /// A buffer with zero blocks flattens to two empty vectors.
    pub fn flatten(self) -> (Vec<f32>, Vec<f32>) {
        let total: usize = self.blocks.iter().map(Vec::len).sum();
        let mut samples = Vec::with_capacity(total);
        for block in &self.blocks {
            samples.extend_from_slice(block);
        }
        (samples, self.overview)
    }
}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buffer = CaptureBuffer::new();
        assert_eq!(buffer.block_count(), 0);
        assert_eq!(buffer.sample_count(), 0);
        assert!(buffer.overview().is_empty());
    }

    #[test]
    fn push_block_records_overview_level() {
        let mut buffer = CaptureBuffer::with_gain(1.0);
        buffer.push_block(&[0.5, 0.5, 0.5, 0.5]);

        assert_eq!(buffer.block_count(), 1);
        assert_eq!(buffer.overview().len(), 1);
        assert!((buffer.overview()[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn flatten_preserves_block_order() {
        let mut buffer = CaptureBuffer::new();
        buffer.push_block(&[0.1, 0.2]);
        buffer.push_block(&[0.3]);
        buffer.push_block(&[0.4, 0.5]);

        let (samples, overview) = buffer.flatten();
        assert_eq!(samples, vec![0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(overview.len(), 3);
    }

    #[test]
    fn flatten_zero_blocks_yields_empty() {
        let (samples, overview) = CaptureBuffer::new().flatten();
        assert!(samples.is_empty());
        assert!(overview.is_empty());
    }

    #[test]
    fn clear_discards_everything() {
        let mut buffer = CaptureBuffer::new();
        buffer.push_block(&[0.1; 64]);
        buffer.clear();

        assert_eq!(buffer.block_count(), 0);
        assert!(buffer.overview().is_empty());
    }

    #[test]
    fn sample_count_sums_blocks() {
        let mut buffer = CaptureBuffer::new();
        buffer.push_block(&[0.0; 128]);
        buffer.push_block(&[0.0; 64]);
        assert_eq!(buffer.sample_count(), 192);
    }
}
