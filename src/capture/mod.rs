//! Audio capture and the recording state machine
//!
//! `AudioRecorder` is the seam to the platform recorder; `MicRecorder`
//! implements it with cpal against the default input device. `CaptureSession`
//! owns the lifecycle: Idle → Recording → Stopped → Saved, with an explicit
//! discard path back to Idle. A recording is only persisted on save, after
//! transcription succeeds; a discarded capture never touches the store.

mod mic;
mod recorder;
mod session;

pub use mic::MicRecorder;
pub use recorder::{AudioRecorder, CapturedAudio};
pub use session::{CaptureSession, CaptureState};
