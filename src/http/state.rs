use crate::capture::CaptureSession;
use crate::enrich::Enricher;
use crate::remote::ContentApi;
use crate::store::RecordingStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordingStore>,
    pub enricher: Arc<Enricher>,
    pub api: Arc<dyn ContentApi>,

    /// The single capture session. Handlers lock it for the duration of each
    /// lifecycle operation, which also serializes save and discard against
    /// start and stop.
    pub capture: Arc<Mutex<CaptureSession>>,
}

impl AppState {
    pub fn new(
        store: Arc<RecordingStore>,
        api: Arc<dyn ContentApi>,
        capture: CaptureSession,
    ) -> Self {
        let enricher = Arc::new(Enricher::new(Arc::clone(&store), Arc::clone(&api)));
        Self {
            store,
            enricher,
            api,
            capture: Arc::new(Mutex::new(capture)),
        }
    }
}
