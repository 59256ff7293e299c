//! Application layer - Use cases and port interfaces
//!
//! Contains the core recording operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod record;

// Re-export use cases
pub use record::{RecordError, RecordSessionUseCase};
