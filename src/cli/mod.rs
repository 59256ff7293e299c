//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the interactive record runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod library_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{load_merged_config, run_record, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, RecordOptions};
pub use presenter::Presenter;
