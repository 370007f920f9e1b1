use super::recorder::{AudioRecorder, CapturedAudio};
use crate::error::{Error, Result};
use crate::recording::Recording;
use crate::remote::ContentApi;
use crate::store::RecordingStore;
use chrono::Utc;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Capture lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture in progress.
    Idle,
    /// Audio is being captured.
    Recording,
    /// Capture finished; audio asset pending save or discard.
    Stopped,
    /// The last capture was transcribed and persisted.
    Saved,
}

impl CaptureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Recording => "recording",
            CaptureState::Stopped => "stopped",
            CaptureState::Saved => "saved",
        }
    }
}

/// The capture state machine: Idle → Recording → Stopped → Saved, with an
/// explicit discard path back to Idle.
///
/// Every failure returns the machine to its prior stable state and nothing
/// is retried automatically. A recording is persisted only on save, after
/// transcription succeeds; a discarded capture is never written.
pub struct CaptureSession {
    recorder: Box<dyn AudioRecorder>,
    state: CaptureState,
    captured: Option<CapturedAudio>,

    /// Elapsed whole seconds since capture start. Display only, never
    /// persisted.
    elapsed_secs: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl CaptureSession {
    pub fn new(recorder: Box<dyn AudioRecorder>) -> Self {
        Self {
            recorder,
            state: CaptureState::Idle,
            captured: None,
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            ticker: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Seconds elapsed in the current capture, for display.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs.load(Ordering::Relaxed)
    }

    /// Begin a new capture. Requires microphone permission; on any failure
    /// the session stays where it was.
    pub async fn start(&mut self) -> Result<()> {
        if !matches!(self.state, CaptureState::Idle | CaptureState::Saved) {
            return Err(Error::InvalidCaptureState {
                expected: "idle or saved",
            });
        }

        if !self.recorder.request_permission().await? {
            return Err(Error::PermissionDenied);
        }

        self.recorder.start().await?;

        self.elapsed_secs.store(0, Ordering::Relaxed);
        let elapsed = Arc::clone(&self.elapsed_secs);
        self.ticker = Some(tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(1));
            tick.tick().await; // first tick completes immediately
            loop {
                tick.tick().await;
                elapsed.fetch_add(1, Ordering::Relaxed);
            }
        }));

        self.state = CaptureState::Recording;
        info!("Capture started ({})", self.recorder.name());

        Ok(())
    }

    /// Stop the capture, finalizing the audio asset and its duration.
    pub async fn stop(&mut self) -> Result<()> {
        if self.state != CaptureState::Recording {
            return Err(Error::InvalidCaptureState {
                expected: "recording",
            });
        }

        self.cancel_ticker();

        match self.recorder.stop().await {
            Ok(captured) => {
                info!(
                    "Capture stopped: {} ({} ms)",
                    captured.location, captured.duration_millis
                );
                self.captured = Some(captured);
                self.state = CaptureState::Stopped;
                Ok(())
            }
            Err(e) => {
                // The asset is unrecoverable; return to Idle so a new capture
                // can start.
                self.state = CaptureState::Idle;
                Err(e)
            }
        }
    }

    /// Transcribe the pending capture and persist it as a new Recording.
    ///
    /// The credential must be configured before any network call is made.
    /// On failure the session stays Stopped and nothing is persisted, so the
    /// caller may retry or discard.
    pub async fn save(
        &mut self,
        store: &RecordingStore,
        api: &dyn ContentApi,
    ) -> Result<Recording> {
        if self.state != CaptureState::Stopped {
            return Err(Error::InvalidCaptureState { expected: "stopped" });
        }
        let Some(captured) = self.captured.clone() else {
            return Err(Error::InvalidCaptureState { expected: "stopped" });
        };

        let api_key = store.api_key().await?.ok_or(Error::CredentialMissing)?;

        let audio = tokio::fs::read(&captured.location)
            .await
            .map_err(|e| Error::Capture(format!("failed to read audio asset: {}", e)))?;

        let file_name = Path::new(&captured.location)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav");

        let transcription = api.transcribe(&api_key, &audio, file_name).await?;

        let id = Utc::now().timestamp_millis();
        let mut recording = Recording::new(id, captured.location, captured.duration_millis);
        recording.transcription = Some(transcription);

        store.save(&recording).await?;

        self.captured = None;
        self.state = CaptureState::Saved;
        info!("Capture saved as recording {}", id);

        Ok(recording)
    }

    /// Drop the pending capture without persisting anything. The audio asset
    /// is removed best-effort.
    pub async fn discard(&mut self) -> Result<()> {
        if self.state != CaptureState::Stopped {
            return Err(Error::InvalidCaptureState { expected: "stopped" });
        }

        if let Some(captured) = self.captured.take() {
            if let Err(e) = tokio::fs::remove_file(&captured.location).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove discarded asset {}: {}", captured.location, e);
                }
            }
            info!("Capture discarded: {}", captured.location);
        }

        self.state = CaptureState::Idle;

        Ok(())
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
