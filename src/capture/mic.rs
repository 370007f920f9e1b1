use super::recorder::{AudioRecorder, CapturedAudio};
use crate::error::{Error, Result};
use chrono::Utc;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tracing::{error, info};

/// Microphone recorder backed by cpal.
///
/// cpal streams are not Send, so the stream lives on a dedicated capture
/// thread that parks until stop. Samples are converted to i16 in the stream
/// callback and written out as a timestamped WAV when the capture ends.
pub struct MicRecorder {
    recordings_dir: PathBuf,
    worker: Option<CaptureWorker>,
}

struct CaptureWorker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
    samples: Arc<Mutex<Vec<i16>>>,
    sample_rate: u32,
    channels: u16,
}

impl MicRecorder {
    pub fn new(recordings_dir: impl AsRef<Path>) -> Result<Self> {
        let recordings_dir = recordings_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&recordings_dir).map_err(|e| {
            Error::Capture(format!(
                "failed to create recordings directory {}: {}",
                recordings_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            recordings_dir,
            worker: None,
        })
    }

    fn drain_worker(worker: CaptureWorker) -> Result<(Vec<i16>, u32, u16)> {
        // Sender drop alone would also unpark the thread; the explicit send
        // keeps the intent visible.
        let _ = worker.stop_tx.send(());
        worker
            .handle
            .join()
            .map_err(|_| Error::Capture("capture thread panicked".to_string()))?;

        let samples = worker
            .samples
            .lock()
            .map_err(|_| Error::Capture("capture buffer poisoned".to_string()))?
            .split_off(0);

        Ok((samples, worker.sample_rate, worker.channels))
    }
}

#[async_trait::async_trait]
impl AudioRecorder for MicRecorder {
    async fn request_permission(&self) -> Result<bool> {
        // cpal exposes no permission query; an absent default input device is
        // the observable form of denial on every platform we target.
        Ok(cpal::default_host().default_input_device().is_some())
    }

    async fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Err(Error::Capture("already capturing".to_string()));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<(u32, u16), String>>();

        let samples = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&samples);

        let handle = std::thread::spawn(move || {
            let host = cpal::default_host();
            let Some(device) = host.default_input_device() else {
                let _ = ready_tx.send(Err("no input device available".to_string()));
                return;
            };

            let supported = match device.default_input_config() {
                Ok(config) => config,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("failed to get input config: {}", e)));
                    return;
                }
            };

            let sample_rate = supported.sample_rate().0;
            let channels = supported.channels();
            let config: cpal::StreamConfig = supported.into();

            let stream = match device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buffer) = sink.lock() {
                        buffer.extend(
                            data.iter()
                                .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16),
                        );
                    }
                },
                |e| error!("Audio input stream error: {}", e),
                None,
            ) {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = ready_tx.send(Err(format!("failed to build input stream: {}", e)));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                let _ = ready_tx.send(Err(format!("failed to start input stream: {}", e)));
                return;
            }

            let _ = ready_tx.send(Ok((sample_rate, channels)));

            // Park until stop is requested or the recorder is dropped.
            let _ = stop_rx.recv();
            drop(stream);
        });

        let (sample_rate, channels) = ready_rx
            .recv()
            .map_err(|_| Error::Capture("capture thread exited before starting".to_string()))?
            .map_err(Error::Capture)?;

        info!(
            "Microphone capture started ({} Hz, {} channels)",
            sample_rate, channels
        );

        self.worker = Some(CaptureWorker {
            stop_tx,
            handle,
            samples,
            sample_rate,
            channels,
        });

        Ok(())
    }

    async fn stop(&mut self) -> Result<CapturedAudio> {
        let worker = self
            .worker
            .take()
            .ok_or_else(|| Error::Capture("not capturing".to_string()))?;

        let (samples, sample_rate, channels) = Self::drain_worker(worker)?;

        if channels == 0 || sample_rate == 0 {
            return Err(Error::Capture("invalid capture format".to_string()));
        }

        let duration_millis =
            samples.len() as u64 * 1000 / (sample_rate as u64 * channels as u64);

        let path = self
            .recordings_dir
            .join(format!("capture-{}.wav", Utc::now().timestamp_millis()));

        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| Error::Capture(format!("failed to create WAV file: {}", e)))?;

        for sample in &samples {
            writer
                .write_sample(*sample)
                .map_err(|e| Error::Capture(format!("failed to write sample: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| Error::Capture(format!("failed to finalize WAV file: {}", e)))?;

        info!(
            "Microphone capture stopped: {} ({} ms, {} samples)",
            path.display(),
            duration_millis,
            samples.len()
        );

        Ok(CapturedAudio {
            location: path.display().to_string(),
            duration_millis,
        })
    }

    fn is_recording(&self) -> bool {
        self.worker.is_some()
    }

    fn name(&self) -> &str {
        "microphone"
    }
}

impl Drop for MicRecorder {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = MicRecorder::drain_worker(worker);
        }
    }
}
