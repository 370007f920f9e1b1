use super::api::ContentApi;
use crate::error::{Error, Result};
use crate::recording::{ContentKind, Language};
use reqwest::multipart;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const SYSTEM_PROMPT: &str =
    "You are an assistant that analyzes and summarizes transcribed speech.";

/// Configuration for the OpenAI-compatible client.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API root, e.g. "https://api.openai.com/v1".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional locale hint passed to the transcription endpoint.
    #[serde(default)]
    pub language: Option<String>,

    /// Timeout applied at the HTTP boundary. Remote calls otherwise have no
    /// cancellation of their own.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            transcription_model: default_transcription_model(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            language: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// reqwest-backed implementation of the content collaborator.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::RemoteRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    async fn chat(&self, api_key: &str, instruction: &str, transcript: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{}\n\n{}", instruction, transcript),
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::RemoteRequest(e.to_string()))?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteResponseMalformed(e.to_string()))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::RemoteResponseMalformed("chat response has no choices".to_string())
            })?;

        debug!("Chat completion returned {} chars", text.len());

        Ok(text)
    }
}

#[async_trait::async_trait]
impl ContentApi for OpenAiClient {
    async fn transcribe(&self, api_key: &str, audio: &[u8], file_name: &str) -> Result<String> {
        info!("Transcribing {} bytes of audio", audio.len());

        let part = multipart::Part::bytes(audio.to_vec())
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| Error::RemoteRequest(e.to_string()))?;

        let mut form = multipart::Form::new()
            .part("file", part)
            .text("model", self.config.transcription_model.clone());

        if let Some(language) = &self.config.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.config.base_url))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::RemoteRequest(e.to_string()))?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteResponseMalformed(e.to_string()))?;

        if body.text.is_empty() {
            return Err(Error::RemoteResponseMalformed(
                "transcription response has no text".to_string(),
            ));
        }

        info!("Transcription complete: {} chars", body.text.len());

        Ok(body.text)
    }

    async fn generate(
        &self,
        api_key: &str,
        transcript: &str,
        kind: ContentKind,
    ) -> Result<String> {
        info!("Generating {} from transcript", kind);
        self.chat(api_key, kind.instruction(), transcript).await
    }

    async fn translate(
        &self,
        api_key: &str,
        transcript: &str,
        language: Language,
    ) -> Result<String> {
        info!("Translating transcript into {}", language.name());

        let instruction = format!(
            "Please translate the following transcript into {}. \
             Return only the translated text:",
            language.name()
        );

        self.chat(api_key, &instruction, transcript).await
    }
}

/// Map a non-success response to the error taxonomy, preferring the API's
/// own error message when the body is parseable.
async fn remote_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .map(|b| b.error.message)
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::RemoteAuth(message),
        _ => Error::RemoteRequest(message),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
