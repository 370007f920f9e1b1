use crate::error::Result;

/// A finished capture: where the audio asset landed and how long it is.
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    /// Opaque reference to the audio asset (a filesystem path for the
    /// microphone backend). Immutable once set.
    pub location: String,

    /// Captured duration, computed at stop time.
    pub duration_millis: u64,
}

/// Platform audio recorder.
///
/// Implementations own the platform capture machinery and produce one audio
/// asset per start/stop cycle. The session layer never sees samples, only the
/// finished asset reference.
#[async_trait::async_trait]
pub trait AudioRecorder: Send + Sync {
    /// Whether the platform grants microphone access. Queried once per
    /// capture, before starting.
    async fn request_permission(&self) -> Result<bool>;

    /// Begin capturing audio.
    async fn start(&mut self) -> Result<()>;

    /// Stop capturing and finalize the audio asset.
    async fn stop(&mut self) -> Result<CapturedAudio>;

    /// Check if the recorder is currently capturing.
    fn is_recording(&self) -> bool;

    /// Get recorder name for logging.
    fn name(&self) -> &str;
}
