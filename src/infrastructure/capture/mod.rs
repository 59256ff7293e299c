//! Capture adapters

mod cpal_capture;

pub use cpal_capture::CpalCapture;
