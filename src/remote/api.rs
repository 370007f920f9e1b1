use crate::error::Result;
use crate::recording::{ContentKind, Language};

/// Interface to the hosted transcription/chat API.
///
/// All operations take the credential explicitly so they can be exercised
/// with fake credentials in tests.
#[async_trait::async_trait]
pub trait ContentApi: Send + Sync {
    /// Transcribe audio bytes into plain text.
    async fn transcribe(&self, api_key: &str, audio: &[u8], file_name: &str) -> Result<String>;

    /// Generate content of the given kind from a transcript.
    async fn generate(&self, api_key: &str, transcript: &str, kind: ContentKind)
        -> Result<String>;

    /// Translate a transcript into the target language.
    async fn translate(
        &self,
        api_key: &str,
        transcript: &str,
        language: Language,
    ) -> Result<String>;
}
