// Shared test doubles for the lifecycle tests. Not every test binary uses
// every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{Notify, Semaphore};
use voxnote::{
    AudioRecorder, CapturedAudio, ContentApi, ContentKind, Error, Language, Result,
};

/// Scripted content collaborator: counts calls and answers with a canned
/// success or failure.
pub struct FakeApi {
    calls: AtomicUsize,
    behavior: Mutex<Behavior>,
}

enum Behavior {
    Succeed(String),
    Fail(String),
}

impl FakeApi {
    pub fn returning(text: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            behavior: Mutex::new(Behavior::Succeed(text.to_string())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            behavior: Mutex::new(Behavior::Fail(message.to_string())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.behavior.lock().unwrap() {
            Behavior::Succeed(text) => Ok(text.clone()),
            Behavior::Fail(message) => Err(Error::RemoteRequest(message.clone())),
        }
    }
}

#[async_trait::async_trait]
impl ContentApi for FakeApi {
    async fn transcribe(&self, _api_key: &str, _audio: &[u8], _file_name: &str) -> Result<String> {
        self.respond()
    }

    async fn generate(
        &self,
        _api_key: &str,
        _transcript: &str,
        _kind: ContentKind,
    ) -> Result<String> {
        self.respond()
    }

    async fn translate(
        &self,
        _api_key: &str,
        _transcript: &str,
        _language: Language,
    ) -> Result<String> {
        self.respond()
    }
}

/// Content collaborator whose calls park on a gate until released, so a test
/// can hold an operation mid-flight.
pub struct BlockingApi {
    gate: Semaphore,
    entered: AtomicUsize,
    notify: Notify,
}

impl BlockingApi {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            entered: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    /// Wait until at least `n` remote calls have started.
    pub async fn wait_for_entries(&self, n: usize) {
        loop {
            let notified = self.notify.notified();
            if self.entered.load(Ordering::SeqCst) >= n {
                return;
            }
            notified.await;
        }
    }

    /// Let `n` parked calls complete.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    async fn block(&self) -> Result<String> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();

        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| Error::RemoteRequest("gate closed".to_string()))?;
        permit.forget();

        Ok("released".to_string())
    }
}

#[async_trait::async_trait]
impl ContentApi for BlockingApi {
    async fn transcribe(&self, _api_key: &str, _audio: &[u8], _file_name: &str) -> Result<String> {
        self.block().await
    }

    async fn generate(
        &self,
        _api_key: &str,
        _transcript: &str,
        _kind: ContentKind,
    ) -> Result<String> {
        self.block().await
    }

    async fn translate(
        &self,
        _api_key: &str,
        _transcript: &str,
        _language: Language,
    ) -> Result<String> {
        self.block().await
    }
}

/// Scripted platform recorder: no real audio, produces a pre-arranged asset.
pub struct ScriptedRecorder {
    pub permission: bool,
    pub fail_start: bool,
    pub fail_stop: bool,
    pub location: String,
    pub duration_millis: u64,
    recording: bool,
}

impl ScriptedRecorder {
    pub fn new(location: &str, duration_millis: u64) -> Self {
        Self {
            permission: true,
            fail_start: false,
            fail_stop: false,
            location: location.to_string(),
            duration_millis,
            recording: false,
        }
    }

    pub fn denied() -> Self {
        let mut recorder = Self::new("unused.wav", 0);
        recorder.permission = false;
        recorder
    }
}

#[async_trait::async_trait]
impl AudioRecorder for ScriptedRecorder {
    async fn request_permission(&self) -> Result<bool> {
        Ok(self.permission)
    }

    async fn start(&mut self) -> Result<()> {
        if self.fail_start {
            return Err(Error::Capture("scripted start failure".to_string()));
        }
        self.recording = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<CapturedAudio> {
        self.recording = false;
        if self.fail_stop {
            return Err(Error::Capture("scripted stop failure".to_string()));
        }
        Ok(CapturedAudio {
            location: self.location.clone(),
            duration_millis: self.duration_millis,
        })
    }

    fn is_recording(&self) -> bool {
        self.recording
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
