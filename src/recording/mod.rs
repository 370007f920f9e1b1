//! Recording data model
//!
//! A `Recording` is the sole persisted entity: one audio capture plus the
//! text artifacts derived from it (transcription, summary, minutes, analysis,
//! translation). Records are written as complete objects on every mutation.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One captured recording and its derived text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Creation timestamp in milliseconds since epoch. Unique, immutable,
    /// doubles as the sort key and the persistence key suffix.
    pub id: i64,

    /// User-assigned title; a placeholder is substituted at display time.
    pub title: Option<String>,

    /// Reference to the captured audio asset. Immutable once set.
    pub audio_location: String,

    /// Captured once at recording-stop time. Immutable.
    pub duration_millis: u64,

    /// Set once by the transcription step; read-only input to all
    /// enrichment steps afterwards.
    pub transcription: Option<String>,

    pub summary: Option<String>,
    pub minutes: Option<String>,
    pub analysis: Option<String>,

    /// Most recent translation. Overwrite semantics, no per-language cache.
    pub translation: Option<String>,
    pub translation_language: Option<Language>,
}

impl Recording {
    pub fn new(id: i64, audio_location: String, duration_millis: u64) -> Self {
        Self {
            id,
            title: None,
            audio_location,
            duration_millis,
            transcription: None,
            summary: None,
            minutes: None,
            analysis: None,
            translation: None,
            translation_language: None,
        }
    }

    /// When this recording was created, derived from its id.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.id)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Transcription text, if present and non-blank.
    pub fn transcript(&self) -> Option<&str> {
        self.transcription
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    pub fn content(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::Summary => self.summary.as_deref(),
            ContentKind::Minutes => self.minutes.as_deref(),
            ContentKind::Analysis => self.analysis.as_deref(),
        }
    }

    /// Overwrite one generated field. Regeneration simply replaces the
    /// previous value.
    pub fn set_content(&mut self, kind: ContentKind, text: String) {
        match kind {
            ContentKind::Summary => self.summary = Some(text),
            ContentKind::Minutes => self.minutes = Some(text),
            ContentKind::Analysis => self.analysis = Some(text),
        }
    }
}

/// The closed set of generated content kinds, each carrying its fixed
/// instruction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Summary,
    Minutes,
    Analysis,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Summary => "summary",
            ContentKind::Minutes => "minutes",
            ContentKind::Analysis => "analysis",
        }
    }

    /// Section heading used in share digests and listings.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Summary => "Summary",
            ContentKind::Minutes => "Meeting minutes",
            ContentKind::Analysis => "Analysis",
        }
    }

    /// Instruction prepended to the transcript in the generation request.
    pub fn instruction(&self) -> &'static str {
        match self {
            ContentKind::Summary => {
                "Please provide a concise summary of the following transcript:"
            }
            ContentKind::Minutes => {
                "Please create formal meeting minutes from the following transcript. \
                 Include the date, participants if mentioned, topics discussed, \
                 decisions made, and next steps:"
            }
            ContentKind::Analysis => {
                "Please provide a detailed analysis of the following transcript, \
                 covering the main themes, key points, and any recommendations:"
            }
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Zh,
    Ja,
    Ko,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::En,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ru,
        Language::Zh,
        Language::Ja,
        Language::Ko,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Ja => "ja",
            Language::Ko => "ko",
        }
    }

    /// Human-readable name, used in the translation instruction.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
            Language::Ru => "Russian",
            Language::Zh => "Chinese",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| format!("unknown language code: {}", s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Render a duration in milliseconds as `m:ss` for display.
pub fn format_duration(millis: u64) -> String {
    let total_secs = millis / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
