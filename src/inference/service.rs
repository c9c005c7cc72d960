//! The prayer generation service: prompt in, prayer text out.
//!
//! Stateless. One provider call per invocation, no retries, no
//! post-processing of the returned text.

use log::{info, warn};

use crate::core::prayer::PrayerRequest;
use crate::inference::prompt::build_prayer_prompt;
use crate::inference::provider::{GenerationError, GenerationRequest, PrayerProvider};

pub async fn generate_prayer(
    provider: &dyn PrayerProvider,
    request: &PrayerRequest,
) -> Result<String, GenerationError> {
    let prompt = build_prayer_prompt(&request.user_input, &request.verse, request.tone);
    info!(
        "Generating prayer via {}: model={}, tone={:?}, input_len={}",
        provider.name(),
        provider.model(),
        request.tone,
        request.user_input.len()
    );

    let result = provider
        .generate(GenerationRequest {
            model: provider.model(),
            prompt: &prompt,
        })
        .await;

    match &result {
        Ok(text) => info!("Prayer generated: {} bytes", text.len()),
        Err(e) => warn!("Error generating prayer: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prayer::{PRAYER_VERSE, Tone};
    use crate::test_support::FakeProvider;

    fn request() -> PrayerRequest {
        PrayerRequest {
            user_input: "我很焦慮".to_string(),
            tone: Tone::Repentance,
            verse: PRAYER_VERSE,
        }
    }

    #[tokio::test]
    async fn test_returns_provider_text_verbatim() {
        let provider = FakeProvider::replying("  主啊，求你安慰我...\n");
        let text = generate_prayer(&provider, &request()).await.unwrap();
        assert_eq!(text, "  主啊，求你安慰我...\n");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_request_fields() {
        let provider = FakeProvider::replying("ok");
        generate_prayer(&provider, &request()).await.unwrap();
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("我很焦慮"));
        assert!(prompt.contains("悔改"));
        assert!(prompt.contains(PRAYER_VERSE.reference));
    }

    #[tokio::test]
    async fn test_failure_is_passed_through() {
        let provider = FakeProvider::failing();
        let err = generate_prayer(&provider, &request()).await.unwrap_err();
        assert!(err.to_string().contains("prayer generation failed"));
        assert_eq!(provider.calls(), 1);
    }
}
