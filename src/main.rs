//! Wavemark CLI entry point

use std::process::ExitCode;

use clap::Parser;

use wavemark::cli::{
    app::{load_merged_config, run_record, EXIT_ERROR},
    args::{Cli, Commands, RecordOptions},
    config_cmd::handle_config_command,
    library_cmd,
    presenter::Presenter,
};
use wavemark::domain::config::AppConfig;
use wavemark::infrastructure::{FsRecordingStore, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(command) => {
            let config = load_merged_config(AppConfig::empty()).await;
            let store = match config.output_dir_path() {
                Some(root) => FsRecordingStore::with_root(root),
                None => FsRecordingStore::new(),
            };
            let result = match command {
                Commands::List => library_cmd::handle_list(&store, &presenter).await,
                Commands::Rename { id, name } => {
                    library_cmd::handle_rename(&store, &presenter, &id, &name).await
                }
                Commands::Relabel { id, marker, label } => {
                    library_cmd::handle_relabel(&store, &presenter, &id, marker, &label).await
                }
                Commands::Delete { id } => library_cmd::handle_delete(&store, &presenter, &id).await,
                Commands::Clear { yes } => library_cmd::handle_clear(&store, &presenter, yes).await,
                Commands::Export { id, path } => {
                    library_cmd::handle_export(&store, &presenter, &id, &path).await
                }
                Commands::Config { .. } => unreachable!(), // Handled above
            };
            if let Err(e) = result {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        output_dir: None, // Output dir comes from the config file only
        device: cli.device.clone(),
        live_gain: None,
        overview_gain: None,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = RecordOptions {
        name: cli.name,
        device: config.device.clone(),
        output: cli.output,
        library_root: config.output_dir_path(),
        live_gain: config.live_gain_or_default(),
        overview_gain: config.overview_gain_or_default(),
    };

    run_record(options).await
}
