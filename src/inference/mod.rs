pub mod prompt;
pub mod provider;
pub mod providers;
pub mod service;

pub use prompt::build_prayer_prompt;
pub use provider::{GenerationError, GenerationRequest, PrayerProvider};
pub use providers::GeminiProvider;
pub use service::generate_prayer;
