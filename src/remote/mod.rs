//! Remote content collaborator
//!
//! Three logical operations over one HTTP JSON/multipart API:
//! - transcribe audio bytes into plain text
//! - generate text (summary, minutes or analysis) from a transcript
//! - translate a transcript into a target language
//!
//! The bearer credential is injected by the caller on every call; the client
//! never reads it from ambient state.

mod api;
mod openai;

pub use api::ContentApi;
pub use openai::{OpenAiClient, OpenAiConfig};
