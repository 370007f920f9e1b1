//! Enrichment engine
//!
//! Given a persisted recording with a non-empty transcription, produce one of
//! summary / minutes / analysis / translation and persist the updated record
//! as a full overwrite. On any failure the persisted record is left exactly
//! as it was.

use crate::error::{Error, Result};
use crate::recording::{ContentKind, Language, Recording};
use crate::remote::ContentApi;
use crate::store::RecordingStore;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Enrichment operations over persisted recordings.
///
/// At most one enrichment per recording is in flight at a time; the marker is
/// owned here rather than relying on callers to serialize their requests.
pub struct Enricher {
    store: Arc<RecordingStore>,
    api: Arc<dyn ContentApi>,
    in_flight: Mutex<HashSet<i64>>,
}

impl Enricher {
    pub fn new(store: Arc<RecordingStore>, api: Arc<dyn ContentApi>) -> Self {
        Self {
            store,
            api,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Generate content of the given kind and persist it. Re-invoking for a
    /// kind that already has content overwrites the previous value.
    pub async fn generate(&self, id: i64, kind: ContentKind) -> Result<Recording> {
        let _slot = self.claim(id)?;

        let (mut recording, transcript, api_key) = self.prepare(id).await?;

        let text = self
            .api
            .generate(&api_key, &transcript, kind)
            .await
            .map_err(|e| Error::ContentGeneration(e.to_string()))?;

        recording.set_content(kind, text);
        self.store.save(&recording).await?;

        info!("Generated {} for recording {}", kind, id);

        Ok(recording)
    }

    /// Translate the transcription into the target language and persist it.
    pub async fn translate(&self, id: i64, language: Language) -> Result<Recording> {
        let _slot = self.claim(id)?;

        let (mut recording, transcript, api_key) = self.prepare(id).await?;

        let text = self
            .api
            .translate(&api_key, &transcript, language)
            .await
            .map_err(|e| Error::Translation(e.to_string()))?;

        recording.translation = Some(text);
        recording.translation_language = Some(language);
        self.store.save(&recording).await?;

        info!("Translated recording {} into {}", id, language.name());

        Ok(recording)
    }

    /// Common preconditions: the record exists, has a non-empty
    /// transcription, and a credential is configured. All checked before any
    /// network call.
    async fn prepare(&self, id: i64) -> Result<(Recording, String, String)> {
        let recording = self
            .store
            .load(id)
            .await?
            .ok_or(Error::RecordingNotFound(id))?;

        let transcript = recording
            .transcript()
            .ok_or(Error::TranscriptMissing)?
            .to_string();

        let api_key = self.store.api_key().await?.ok_or(Error::CredentialMissing)?;

        Ok((recording, transcript, api_key))
    }

    fn claim(&self, id: i64) -> Result<InFlightSlot<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| Error::OperationInFlight(id))?;

        if !in_flight.insert(id) {
            return Err(Error::OperationInFlight(id));
        }

        Ok(InFlightSlot { enricher: self, id })
    }
}

/// Single-slot in-flight marker, released on every exit path.
struct InFlightSlot<'a> {
    enricher: &'a Enricher,
    id: i64,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.enricher.in_flight.lock() {
            in_flight.remove(&self.id);
        }
    }
}
