//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems: the cpal capture device, the
//! filesystem recording library, and the XDG config file.

pub mod capture;
pub mod config;
pub mod store;

// Re-export adapters
pub use capture::CpalCapture;
pub use config::XdgConfigStore;
pub use store::FsRecordingStore;
