//! Wavemark - Voice memo recorder with cue-point markers
//!
//! Records mono audio from a microphone, lets the user drop time-stamped
//! markers while recording, and writes standard WAV files whose markers
//! are embedded as native `cue ` chunk points.
//!
//! Architecture: hexagonal (ports and adapters)
//! - domain: recorder state machine, capture buffer, WAV encoder
//! - application: use cases and port traits
//! - infrastructure: cpal capture, filesystem library, XDG config
//! - cli: argument parsing and the interactive record runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
