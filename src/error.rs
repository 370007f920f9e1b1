use thiserror::Error;

/// Errors surfaced by the recording lifecycle core.
///
/// Every operation fails closed: on any error the persisted state is left
/// exactly as it was before the operation began. Retry is the caller's
/// decision; nothing here retries automatically.
#[derive(Debug, Error)]
pub enum Error {
    #[error("microphone permission not granted")]
    PermissionDenied,

    #[error("audio capture failed: {0}")]
    Capture(String),

    #[error("no API key configured")]
    CredentialMissing,

    #[error("recording has no transcription")]
    TranscriptMissing,

    #[error("recording {0} not found")]
    RecordingNotFound(i64),

    #[error("remote API rejected the credential: {0}")]
    RemoteAuth(String),

    #[error("remote API request failed: {0}")]
    RemoteRequest(String),

    #[error("remote API returned an unexpected response: {0}")]
    RemoteResponseMalformed(String),

    #[error("content generation failed: {0}")]
    ContentGeneration(String),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("another operation is already in flight for recording {0}")]
    OperationInFlight(i64),

    #[error("capture session is not {expected}")]
    InvalidCaptureState { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
