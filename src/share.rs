//! Plain-text share digest for a recording.

use crate::recording::{format_duration, ContentKind, Recording};

const DEFAULT_TITLE: &str = "Untitled recording";

/// Compose a digest of whichever fields are populated, for handing to a
/// platform share facility.
pub fn share_text(recording: &Recording) -> String {
    let title = recording.title.as_deref().unwrap_or(DEFAULT_TITLE);

    let mut text = format!(
        "{} — {}\nDuration: {}\n",
        title,
        recording.recorded_at().format("%Y-%m-%d %H:%M"),
        format_duration(recording.duration_millis),
    );

    if let Some(transcription) = recording.transcript() {
        text.push_str(&format!("\nTranscription:\n{}\n", transcription));
    }

    for kind in [ContentKind::Summary, ContentKind::Minutes, ContentKind::Analysis] {
        if let Some(content) = recording.content(kind) {
            text.push_str(&format!("\n{}:\n{}\n", kind.label(), content));
        }
    }

    if let Some(translation) = &recording.translation {
        let heading = match recording.translation_language {
            Some(language) => format!("Translation ({})", language.name()),
            None => "Translation".to_string(),
        };
        text.push_str(&format!("\n{}:\n{}\n", heading, translation));
    }

    text
}
