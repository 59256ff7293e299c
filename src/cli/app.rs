//! Interactive record runner

use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{interval, Duration as TokioDuration};

use crate::application::ports::{ConfigStore, RecordingStore};
use crate::application::RecordSessionUseCase;
use crate::domain::config::AppConfig;
use crate::domain::recording::{RecorderState, RecordingArtifact, TICK_MS};
use crate::infrastructure::{CpalCapture, FsRecordingStore, XdgConfigStore};

use super::args::RecordOptions;
use super::presenter::{format_duration, format_size, Presenter};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Load the config file and merge CLI-provided overrides on top
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    file_config.merge(cli_config)
}

/// Run an interactive recording session.
///
/// Stdin drives the session: `m` drops a marker, `p`/`r` pause and resume,
/// `s` (or an empty line, or Ctrl+C) stops and saves, `q` aborts and
/// discards. The live meter refreshes at the session tick cadence.
pub async fn run_record(options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let capture = CpalCapture::with_device(options.device.clone());
    let recorder =
        RecordSessionUseCase::with_gains(capture, options.live_gain, options.overview_gain);

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    if let Err(e) = recorder.start().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.info("Recording. Commands: [m]arker  [p]ause  [r]esume  [s]top  [q]uit/discard");
    presenter.start_spinner("Recording...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let artifact = record_loop(&recorder, &mut lines, &shutdown, &presenter).await;

    let Some(artifact) = artifact else {
        presenter.stop_spinner();
        presenter.warn("Recording discarded");
        return ExitCode::from(EXIT_SUCCESS);
    };

    match persist(&artifact, &options).await {
        Ok(saved_as) => {
            presenter.spinner_success(&format!(
                "Saved {} ({}, {} marker(s), {})",
                saved_as,
                format_duration(artifact.duration_secs),
                artifact.markers.len(),
                format_size(artifact.to_wav().len())
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.stop_spinner();
            presenter.error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Drive the session until the user stops or aborts it.
/// Returns the finalized artifact, or None when aborted.
async fn record_loop(
    recorder: &RecordSessionUseCase<CpalCapture>,
    lines: &mut Lines<BufReader<Stdin>>,
    shutdown: &ShutdownSignal,
    presenter: &Presenter,
) -> Option<RecordingArtifact> {
    let mut ticker = interval(TokioDuration::from_millis(TICK_MS));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if shutdown.is_shutdown() {
                    return recorder.stop().await;
                }
                presenter.update_spinner(&status_line(recorder, presenter));
            }
            line = lines.next_line() => {
                let command = match line {
                    Ok(Some(text)) => text.trim().to_lowercase(),
                    // Stdin closed or unreadable: finish the take
                    Ok(None) | Err(_) => return recorder.stop().await,
                };
                match command.as_str() {
                    "m" => {
                        recorder.add_marker();
                    }
                    "p" => recorder.pause(),
                    "r" => recorder.resume(),
                    "s" | "" => return recorder.stop().await,
                    "q" => {
                        recorder.abort().await;
                        return None;
                    }
                    _ => {}
                }
            }
        }
    }
}

fn status_line(recorder: &RecordSessionUseCase<CpalCapture>, presenter: &Presenter) -> String {
    let state = match recorder.state() {
        RecorderState::Paused => "Paused   ",
        _ => "Recording",
    };
    format!(
        "{} {} {} {} marker(s)",
        state,
        format_duration(recorder.elapsed_secs()),
        presenter.level_meter(recorder.live_level()),
        recorder.marker_count()
    )
}

/// Persist the artifact to the library, or to the direct output path.
/// Returns the display name it was saved under.
async fn persist(artifact: &RecordingArtifact, options: &RecordOptions) -> Result<String, String> {
    if let Some(path) = &options.output {
        tokio::fs::write(path, artifact.to_wav())
            .await
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        return Ok(path.display().to_string());
    }

    let store = match &options.library_root {
        Some(root) => FsRecordingStore::with_root(root),
        None => FsRecordingStore::new(),
    };

    let name = match &options.name {
        Some(name) => name.clone(),
        None => {
            let count = store.load_all().await.map_err(|e| e.to_string())?.len();
            format!("Recording {}", count + 1)
        }
    };

    let record = store
        .save(artifact, &name)
        .await
        .map_err(|e| e.to_string())?;
    Ok(format!("\"{}\" ({})", record.name, record.id))
}
