//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Valid keys for `wavemark config set/get`
pub const VALID_CONFIG_KEYS: &[&str] = &["output_dir", "device", "live_gain", "overview_gain"];

/// Check whether a config key is known
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

/// Wavemark - record voice memos as WAV files with embedded cue markers
#[derive(Parser, Debug)]
#[command(name = "wavemark")]
#[command(version = "0.1.0")]
#[command(about = "Record voice memos as WAV files with embedded cue-point markers")]
#[command(long_about = None)]
pub struct Cli {
    /// Name for the new recording (defaults to the next library number)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Input device name (substring match; defaults to the system default)
    #[arg(short = 'd', long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Write the WAV straight to a file instead of the library
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved recordings
    List,
    /// Rename a saved recording
    Rename {
        /// Recording id
        id: String,
        /// New name
        name: String,
    },
    /// Relabel a marker on a saved recording
    Relabel {
        /// Recording id
        id: String,
        /// Marker id
        marker: u32,
        /// New label
        label: String,
    },
    /// Delete a saved recording
    Delete {
        /// Recording id
        id: String,
    },
    /// Delete all saved recordings
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
    /// Copy a saved recording's WAV file to a path
    Export {
        /// Recording id
        id: String,
        /// Destination file
        path: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Options resolved for the interactive record run
#[derive(Debug, Clone)]
pub struct RecordOptions {
    /// Recording name; None picks the next library number
    pub name: Option<String>,
    /// Preferred input device name
    pub device: Option<String>,
    /// Direct output path, bypassing the library
    pub output: Option<PathBuf>,
    /// Library root override from config
    pub library_root: Option<PathBuf>,
    /// Live meter gain
    pub live_gain: f32,
    /// Overview history gain
    pub overview_gain: f32,
}
