use std::fmt;

use async_trait::async_trait;

/// Any failure of the outbound generation call.
///
/// There is deliberately one opaque kind: unreachable endpoint, non-success
/// status, empty or malformed body and a rejected key all end up here. The
/// cause string is for logs only and is never shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    cause: String,
}

impl GenerationError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prayer generation failed: {}", self.cause)
    }
}

impl std::error::Error for GenerationError {}

/// Everything a provider needs to fulfil one generation.
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    /// The entire prompt payload.
    pub prompt: &'a str,
}

#[async_trait]
pub trait PrayerProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Performs exactly one call and returns the generated text verbatim.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GenerationError>;
}
