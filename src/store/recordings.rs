use super::kv::KeyValueStore;
use crate::error::{Error, Result};
use crate::recording::Recording;
use std::sync::Arc;
use tracing::{info, warn};

/// Key prefix for recording records. The suffix is the recording id.
pub const RECORDING_KEY_PREFIX: &str = "recording_";

/// Fixed key holding the remote API credential.
pub const API_KEY_KEY: &str = "openai_api_key";

/// Domain layer over the key-value store.
///
/// Every mutation is a full read-modify-write of the persisted record; there
/// are no field-level patches. Last write wins.
pub struct RecordingStore {
    kv: Arc<dyn KeyValueStore>,
}

impl RecordingStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn key_for(id: i64) -> String {
        format!("{}{}", RECORDING_KEY_PREFIX, id)
    }

    /// Persist a recording as a complete object, overwriting any previous
    /// value under its key.
    pub async fn save(&self, recording: &Recording) -> Result<()> {
        let value = serde_json::to_string(recording)
            .map_err(|e| Error::Persistence(format!("failed to serialize recording: {}", e)))?;

        self.kv.set(&Self::key_for(recording.id), &value).await
    }

    pub async fn load(&self, id: i64) -> Result<Option<Recording>> {
        let Some(value) = self.kv.get(&Self::key_for(id)).await? else {
            return Ok(None);
        };

        let recording = serde_json::from_str(&value)
            .map_err(|e| Error::Persistence(format!("corrupt record for id {}: {}", id, e)))?;

        Ok(Some(recording))
    }

    /// All recordings, newest first. A record that fails to parse is skipped
    /// with a warning rather than failing the whole listing.
    pub async fn list_all(&self) -> Result<Vec<Recording>> {
        let keys = self.kv.keys().await?;

        let mut recordings = Vec::new();
        for key in keys {
            if !key.starts_with(RECORDING_KEY_PREFIX) {
                continue;
            }
            let Some(value) = self.kv.get(&key).await? else {
                continue;
            };
            match serde_json::from_str::<Recording>(&value) {
                Ok(recording) => recordings.push(recording),
                Err(e) => warn!("Skipping corrupt record under {}: {}", key, e),
            }
        }

        recordings.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(recordings)
    }

    /// Delete a recording and, best-effort, its audio asset. Deleting an
    /// absent id is not an error, and a record that no longer parses is
    /// still removed; only the asset cleanup needs a readable record.
    pub async fn delete(&self, id: i64) -> Result<()> {
        match self.load(id).await {
            Ok(Some(recording)) => {
                if let Err(e) = tokio::fs::remove_file(&recording.audio_location).await {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!(
                            "Failed to remove audio asset {}: {}",
                            recording.audio_location, e
                        );
                    }
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Deleting recording {} without asset cleanup: {}", id, e),
        }

        self.kv.remove(&Self::key_for(id)).await?;

        info!("Deleted recording {}", id);

        Ok(())
    }

    /// Rename a recording. Full-object overwrite like every other mutation.
    pub async fn set_title(&self, id: i64, title: String) -> Result<Recording> {
        let mut recording = self
            .load(id)
            .await?
            .ok_or(Error::RecordingNotFound(id))?;

        recording.title = Some(title);
        self.save(&recording).await?;

        Ok(recording)
    }

    /// The configured API credential. A blank value is treated as absent.
    pub async fn api_key(&self) -> Result<Option<String>> {
        Ok(self
            .kv
            .get(API_KEY_KEY)
            .await?
            .filter(|k| !k.trim().is_empty()))
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        self.kv.set(API_KEY_KEY, api_key.trim()).await
    }
}
