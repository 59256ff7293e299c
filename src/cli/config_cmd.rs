//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let mut config = store.load().await?;

    match key {
        "output_dir" => config.output_dir = Some(value.to_string()),
        "device" => config.device = Some(value.to_string()),
        "live_gain" => config.live_gain = Some(parse_gain(key, value)?),
        "overview_gain" => config.overview_gain = Some(parse_gain(key, value)?),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;
    let value = match key {
        "output_dir" => config.output_dir,
        "device" => config.device,
        "live_gain" => config.live_gain.map(|g| g.to_string()),
        "overview_gain" => config.overview_gain.map(|g| g.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let display = |value: Option<String>| value.unwrap_or_else(|| "(not set)".to_string());
    presenter.output(&format!("output_dir = {}", display(config.output_dir)));
    presenter.output(&format!("device = {}", display(config.device)));
    presenter.output(&format!(
        "live_gain = {}",
        display(config.live_gain.map(|g| g.to_string()))
    ));
    presenter.output(&format!(
        "overview_gain = {}",
        display(config.overview_gain.map(|g| g.to_string()))
    ));
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

fn parse_gain(key: &str, value: &str) -> Result<f32, ConfigError> {
    let gain: f32 = value.parse().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be a number".to_string(),
    })?;
    if !gain.is_finite() || gain <= 0.0 {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Gain must be a positive number".to_string(),
        });
    }
    Ok(gain)
}
