pub mod capture;
pub mod config;
pub mod enrich;
pub mod error;
pub mod http;
pub mod recording;
pub mod remote;
pub mod share;
pub mod store;

pub use capture::{AudioRecorder, CaptureSession, CaptureState, CapturedAudio, MicRecorder};
pub use config::Config;
pub use enrich::Enricher;
pub use error::{Error, Result};
pub use http::{create_router, AppState};
pub use recording::{format_duration, ContentKind, Language, Recording};
pub use remote::{ContentApi, OpenAiClient, OpenAiConfig};
pub use share::share_text;
pub use store::{FileStore, KeyValueStore, MemoryStore, RecordingStore};
