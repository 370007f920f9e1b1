//! Capture state machine tests: transitions, failure recovery, and the
//! save/discard endings.

mod common;

use anyhow::Result;
use common::{FakeApi, ScriptedRecorder};
use std::sync::Arc;
use tempfile::TempDir;
use voxnote::{CaptureSession, CaptureState, Error, MemoryStore, RecordingStore};

fn store() -> RecordingStore {
    RecordingStore::new(Arc::new(MemoryStore::new()))
}

/// A scripted recorder whose captured asset actually exists on disk.
fn recorder_with_asset(dir: &TempDir) -> Result<(ScriptedRecorder, String)> {
    let path = dir.path().join("capture-1000.wav");
    std::fs::write(&path, b"RIFF fake wav payload")?;
    let location = path.to_string_lossy().into_owned();
    Ok((ScriptedRecorder::new(&location, 65_000), location))
}

#[tokio::test]
async fn permission_denied_keeps_session_idle() -> Result<()> {
    let mut session = CaptureSession::new(Box::new(ScriptedRecorder::denied()));

    let err = session.start().await.unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));
    assert_eq!(session.state(), CaptureState::Idle);

    Ok(())
}

#[tokio::test]
async fn start_failure_keeps_session_idle() -> Result<()> {
    let mut recorder = ScriptedRecorder::new("unused.wav", 0);
    recorder.fail_start = true;
    let mut session = CaptureSession::new(Box::new(recorder));

    let err = session.start().await.unwrap_err();
    assert!(matches!(err, Error::Capture(_)));
    assert_eq!(session.state(), CaptureState::Idle);

    Ok(())
}

#[tokio::test]
async fn stop_failure_returns_to_idle() -> Result<()> {
    let mut recorder = ScriptedRecorder::new("unused.wav", 0);
    recorder.fail_stop = true;
    let mut session = CaptureSession::new(Box::new(recorder));

    session.start().await?;
    assert_eq!(session.state(), CaptureState::Recording);

    let err = session.stop().await.unwrap_err();
    assert!(matches!(err, Error::Capture(_)));
    assert_eq!(session.state(), CaptureState::Idle);

    Ok(())
}

#[tokio::test]
async fn save_transcribes_and_persists_a_new_recording() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (recorder, location) = recorder_with_asset(&dir)?;
    let mut session = CaptureSession::new(Box::new(recorder));
    let store = store();
    let api = FakeApi::returning("hello from the meeting");
    store.set_api_key("sk-test").await?;

    session.start().await?;
    session.stop().await?;
    assert_eq!(session.state(), CaptureState::Stopped);

    let recording = session.save(&store, &api).await?;
    assert_eq!(session.state(), CaptureState::Saved);
    assert_eq!(recording.audio_location, location);
    assert_eq!(recording.duration_millis, 65_000);
    assert_eq!(
        recording.transcription.as_deref(),
        Some("hello from the meeting")
    );
    assert_eq!(api.call_count(), 1);

    let persisted = store.load(recording.id).await?.unwrap();
    assert_eq!(persisted, recording);

    // A new capture may begin directly from Saved.
    session.start().await?;
    assert_eq!(session.state(), CaptureState::Recording);

    Ok(())
}

#[tokio::test]
async fn save_without_credential_makes_no_network_call() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (recorder, _location) = recorder_with_asset(&dir)?;
    let mut session = CaptureSession::new(Box::new(recorder));
    let store = store();
    let api = FakeApi::returning("unused");

    session.start().await?;
    session.stop().await?;

    let err = session.save(&store, &api).await.unwrap_err();
    assert!(matches!(err, Error::CredentialMissing));
    assert_eq!(api.call_count(), 0);
    assert_eq!(session.state(), CaptureState::Stopped);
    assert!(store.list_all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn failed_transcription_leaves_capture_pending() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (recorder, _location) = recorder_with_asset(&dir)?;
    let mut session = CaptureSession::new(Box::new(recorder));
    let store = store();
    store.set_api_key("sk-test").await?;

    session.start().await?;
    session.stop().await?;

    let failing = FakeApi::failing("upstream timeout");
    let err = session.save(&store, &failing).await.unwrap_err();
    assert!(matches!(err, Error::RemoteRequest(_)));
    assert_eq!(session.state(), CaptureState::Stopped);
    assert!(store.list_all().await?.is_empty());

    // The pending capture survives the failure, so a retry can succeed.
    let working = FakeApi::returning("second attempt");
    let recording = session.save(&store, &working).await?;
    assert_eq!(recording.transcription.as_deref(), Some("second attempt"));
    assert_eq!(session.state(), CaptureState::Saved);

    Ok(())
}

#[tokio::test]
async fn discard_drops_asset_and_persists_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (recorder, location) = recorder_with_asset(&dir)?;
    let mut session = CaptureSession::new(Box::new(recorder));
    let store = store();

    session.start().await?;
    session.stop().await?;

    session.discard().await?;
    assert_eq!(session.state(), CaptureState::Idle);
    assert!(!std::path::Path::new(&location).exists());
    assert!(store.list_all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn transitions_outside_the_state_machine_are_rejected() -> Result<()> {
    let mut session = CaptureSession::new(Box::new(ScriptedRecorder::new("unused.wav", 0)));
    let store = store();
    let api = FakeApi::returning("unused");

    assert!(matches!(
        session.stop().await.unwrap_err(),
        Error::InvalidCaptureState { .. }
    ));
    assert!(matches!(
        session.save(&store, &api).await.unwrap_err(),
        Error::InvalidCaptureState { .. }
    ));
    assert!(matches!(
        session.discard().await.unwrap_err(),
        Error::InvalidCaptureState { .. }
    ));

    session.start().await?;
    assert!(matches!(
        session.start().await.unwrap_err(),
        Error::InvalidCaptureState {
            expected: "idle or saved"
        }
    ));

    Ok(())
}
