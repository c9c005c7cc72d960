//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::inference::{GenerationError, GenerationRequest, PrayerProvider};
use crate::tui::clipboard::{Clipboard, ClipboardError};

/// A provider that answers from a canned reply and records every prompt.
pub struct FakeProvider {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::with_reply(Err("simulated network failure".to_string()))
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl PrayerProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.reply.clone().map_err(GenerationError::new)
    }
}

/// A clipboard that stores writes in memory, or always fails.
#[derive(Default)]
pub struct FakeClipboard {
    pub fail: bool,
    pub writes: Vec<String>,
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::new("clipboard unavailable"));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Creates a test App with a FakeProvider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(FakeProvider::replying("主啊，求你安慰我...")),
        "https://example.com/music".to_string(),
    )
}
