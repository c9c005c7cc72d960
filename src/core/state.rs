//! # Application State
//!
//! Core business state. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn PrayerProvider>   // generation backend
//! ├── model_name: String                  // shown in the title bar
//! ├── music_url: String                   // media shown in the overlay
//! ├── selected: Option<Verse>             // global verse selection
//! ├── copy_feedback: CopyFeedback         // transient "copied" marker
//! ├── prayer: PrayerForm                  // reflection, tone, outcome
//! ├── overlay: OverlayState               // music player visibility + drag
//! └── status_message: String              // title bar status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::content::Verse;
use crate::core::copy_feedback::CopyFeedback;
use crate::core::overlay::OverlayState;
use crate::core::prayer::PrayerForm;
use crate::inference::PrayerProvider;

pub struct App {
    pub provider: Arc<dyn PrayerProvider>,
    pub model_name: String,
    pub music_url: String,
    /// At most one verse across the whole corpus.
    pub selected: Option<Verse>,
    pub copy_feedback: CopyFeedback,
    pub prayer: PrayerForm,
    pub overlay: OverlayState,
    pub status_message: String,
}

impl App {
    pub fn new(provider: Arc<dyn PrayerProvider>, music_url: String) -> Self {
        Self {
            model_name: provider.model().to_string(),
            provider,
            music_url,
            selected: None,
            copy_feedback: CopyFeedback::new(),
            prayer: PrayerForm::new(),
            overlay: OverlayState::new(),
            status_message: String::new(),
        }
    }

    pub fn from_config(provider: Arc<dyn PrayerProvider>, config: &ResolvedConfig) -> Self {
        Self::new(provider, config.music_url.clone())
    }

    pub fn is_selected(&self, verse: &Verse) -> bool {
        self.selected
            .is_some_and(|selected| selected.reference == verse.reference)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::content::PSALM_139;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.selected.is_none());
        assert!(app.copy_feedback.active().is_none());
        assert!(!app.prayer.is_loading);
        assert!(!app.overlay.visible);
        assert_eq!(app.model_name, "test-model");
    }

    #[test]
    fn test_is_selected_compares_references() {
        let mut app = test_app();
        let verse = PSALM_139[0].verses[4];
        app.selected = Some(verse);
        assert!(app.is_selected(&verse));
        assert!(!app.is_selected(&PSALM_139[0].verses[0]));
    }
}
