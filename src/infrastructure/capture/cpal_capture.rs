//! Cross-platform microphone capture using cpal
//!
//! The cpal stream is not Send, so it lives on a dedicated worker thread
//! for the whole life of the capture. The real-time input callback reads a
//! single atomic gate and forwards mono blocks to the sink only while the
//! gate reads "recording"; the worker thread additionally pauses/plays the
//! stream when the gate changes so a suspended capture costs nothing.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex as StdMutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;

use crate::application::ports::{BlockSink, CaptureDevice, CaptureError};

const GATE_IDLE: u8 = 0;
const GATE_RECORDING: u8 = 1;
const GATE_PAUSED: u8 = 2;

/// How often the worker thread polls the gate
const GATE_POLL: Duration = Duration::from_millis(20);

/// Microphone capture adapter backed by cpal
pub struct CpalCapture {
    /// Preferred input device name (substring match); None = host default
    preferred_device: Option<String>,
    gate: Arc<AtomicU8>,
    worker: StdMutex<Option<thread::JoinHandle<()>>>,
}

impl CpalCapture {
    /// Create a capture adapter for the host default input device
    pub fn new() -> Self {
        Self::with_device(None)
    }

    /// Create a capture adapter preferring the named input device
    pub fn with_device(preferred_device: Option<String>) -> Self {
        Self {
            preferred_device,
            gate: Arc::new(AtomicU8::new(GATE_IDLE)),
            worker: StdMutex::new(None),
        }
    }

    /// Find the input device to capture from
    fn find_device(preferred: Option<&str>) -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();

        if let Some(wanted) = preferred {
            let devices = host
                .input_devices()
                .map_err(|e| CaptureError::StreamFailed(format!("Device enumeration: {}", e)))?;
            for device in devices {
                if let Ok(name) = device.name() {
                    if name.to_lowercase().contains(&wanted.to_lowercase()) {
                        return Ok(device);
                    }
                }
            }
            return Err(CaptureError::DeviceUnavailable);
        }

        host.default_input_device()
            .ok_or(CaptureError::DeviceUnavailable)
    }

    /// Mix an interleaved frame buffer down to mono by averaging channels
    fn mix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }

    /// Worker thread body: open the stream, report readiness, then watch
    /// the gate until released.
    fn run_worker(
        preferred: Option<String>,
        gate: Arc<AtomicU8>,
        sink: BlockSink,
        ready: mpsc::Sender<Result<u32, CaptureError>>,
    ) {
        let device = match Self::find_device(preferred.as_deref()) {
            Ok(d) => d,
            Err(e) => {
                gate.store(GATE_IDLE, Ordering::SeqCst);
                let _ = ready.send(Err(e));
                return;
            }
        };

        let supported = match device.default_input_config() {
            Ok(c) => c,
            Err(e) => {
                gate.store(GATE_IDLE, Ordering::SeqCst);
                let _ = ready.send(Err(CaptureError::StreamFailed(format!(
                    "No input config: {}",
                    e
                ))));
                return;
            }
        };

        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        let gate_cb = Arc::clone(&gate);
        let stream_result = match sample_format {
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if gate_cb.load(Ordering::Relaxed) == GATE_RECORDING {
                        let block = CpalCapture::mix_to_mono(data, channels);
                        sink(&block);
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            ),

            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if gate_cb.load(Ordering::Relaxed) == GATE_RECORDING {
                        let f32_data: Vec<f32> =
                            data.iter().map(|&s| s as f32 / 32768.0).collect();
                        let block = CpalCapture::mix_to_mono(&f32_data, channels);
                        sink(&block);
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            ),

            other => {
                gate.store(GATE_IDLE, Ordering::SeqCst);
                let _ = ready.send(Err(CaptureError::StreamFailed(format!(
                    "Unsupported sample format: {:?}",
                    other
                ))));
                return;
            }
        };

        let stream = match stream_result {
            Ok(s) => s,
            Err(e) => {
                gate.store(GATE_IDLE, Ordering::SeqCst);
                let _ = ready.send(Err(CaptureError::StreamFailed(e.to_string())));
                return;
            }
        };

        if let Err(e) = stream.play() {
            gate.store(GATE_IDLE, Ordering::SeqCst);
            let _ = ready.send(Err(CaptureError::StreamFailed(e.to_string())));
            return;
        }

        let _ = ready.send(Ok(sample_rate));

        // Mirror gate transitions onto the stream. The callback gate check
        // alone is correct; pausing the stream stops the device from doing
        // work we would throw away.
        let mut engaged = true;
        loop {
            match gate.load(Ordering::SeqCst) {
                GATE_IDLE => break,
                GATE_RECORDING if !engaged => {
                    let _ = stream.play();
                    engaged = true;
                }
                GATE_PAUSED if engaged => {
                    let _ = stream.pause();
                    engaged = false;
                }
                _ => {}
            }
            thread::sleep(GATE_POLL);
        }

        drop(stream);
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureDevice for CpalCapture {
    async fn acquire(&self, sink: BlockSink) -> Result<u32, CaptureError> {
        if self.gate.load(Ordering::SeqCst) != GATE_IDLE {
            return Err(CaptureError::AlreadyActive);
        }
        self.gate.store(GATE_RECORDING, Ordering::SeqCst);

        let (ready_tx, ready_rx) = mpsc::channel();
        let gate = Arc::clone(&self.gate);
        let preferred = self.preferred_device.clone();
        let handle = thread::spawn(move || Self::run_worker(preferred, gate, sink, ready_tx));

        // The worker always reports once, either the sample rate or the
        // startup failure.
        let result = tokio::task::spawn_blocking(move || ready_rx.recv())
            .await
            .map_err(|e| CaptureError::StreamFailed(format!("Join error: {}", e)))?
            .map_err(|_| CaptureError::StreamFailed("Capture worker exited early".into()))?;

        match result {
            Ok(sample_rate) => {
                *self.worker.lock().unwrap() = Some(handle);
                Ok(sample_rate)
            }
            Err(e) => {
                // Worker already reset the gate; reap the thread
                let _ = tokio::task::spawn_blocking(move || handle.join()).await;
                Err(e)
            }
        }
    }

    fn suspend(&self) {
        let _ = self.gate.compare_exchange(
            GATE_RECORDING,
            GATE_PAUSED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    fn resume(&self) {
        let _ = self.gate.compare_exchange(
            GATE_PAUSED,
            GATE_RECORDING,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    async fn release(&self) {
        self.gate.store(GATE_IDLE, Ordering::SeqCst);
        let handle = self.worker.lock().unwrap().take();
        if let Some(handle) = handle {
            // Once the worker joins, the stream is dropped and no sink
            // invocation can be in flight.
            let _ = tokio::task::spawn_blocking(move || handle.join()).await;
        }
    }

    fn is_active(&self) -> bool {
        self.gate.load(Ordering::SeqCst) != GATE_IDLE
    }
}
