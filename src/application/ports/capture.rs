//! Capture device port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("No audio input device available or permission denied")]
    DeviceUnavailable,

    #[error("Failed to open capture stream: {0}")]
    StreamFailed(String),

    #[error("Capture device is already active")]
    AlreadyActive,
}

/// Callback receiving each captured block of normalized mono samples.
///
/// Invoked from the producer context at the device's block cadence; it must
/// stay cheap and must never block for long.
pub type BlockSink = Arc<dyn Fn(&[f32]) + Send + Sync>;

/// Port for a real-time audio capture device.
///
/// The adapter owns the producer context. Between `acquire` and `release`
/// it delivers fixed-size blocks of normalized samples to the sink, in
/// order, while not suspended. `suspend` must disable delivery at the
/// source rather than merely dropping blocks, and `release` must guarantee
/// that no sink invocation is in flight once it returns, so the caller can
/// safely drain whatever the sink accumulated.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire the input device and begin delivering blocks to `sink`.
    ///
    /// # Returns
    /// The capture sample rate in Hz, or an error. On error no device is
    /// held and no blocks were delivered.
    async fn acquire(&self, sink: BlockSink) -> Result<u32, CaptureError>;

    /// Suspend block delivery without releasing the device.
    /// Safe to call when already suspended.
    fn suspend(&self);

    /// Resume block delivery after a suspend.
    /// Safe to call when already delivering.
    fn resume(&self);

    /// Release the device. After this returns, no further sink
    /// invocations happen. Safe to call when not acquired.
    async fn release(&self);

    /// Whether the device is currently acquired
    fn is_active(&self) -> bool;
}
