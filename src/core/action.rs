//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User activates a verse? That's `Action::ActivateVerse(verse)`.
//! The API responds? That's `Action::PrayerGenerated(text)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the adapter must perform. No side effects
//! happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::content::Verse;
use crate::core::copy_feedback::CopyTicket;
use crate::core::prayer::{PrayerRequest, Tone};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Verse interaction
    ActivateVerse(Verse),
    CopyVerse(Verse),
    CopySucceeded(&'static str),
    CopyFailed(String),
    CopyFeedbackExpired(CopyTicket),

    // Prayer form
    SelectTone(Tone),
    NextTone,
    PrevTone,
    InsertText(String),
    Backspace,
    SubmitPrayer,
    PrayerGenerated(String),
    PrayerFailed(String),

    // Overlay
    ToggleOverlay { viewport: (u16, u16) },
    CloseOverlay,
    PointerDown { col: u16, row: u16 },
    PointerMoved { col: u16, row: u16 },
    PointerUp,
    OpenMusic,

    Quit,
}

/// I/O requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Write the verse to the clipboard, then report back with
    /// `CopySucceeded` or `CopyFailed`.
    WriteClipboard(Verse),
    /// Send `CopyFeedbackExpired(ticket)` after `COPY_FEEDBACK_DURATION`.
    ScheduleCopyClear(CopyTicket),
    /// Run the generation service, then report back with
    /// `PrayerGenerated` or `PrayerFailed`.
    SpawnGeneration(PrayerRequest),
    OpenUrl(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ActivateVerse(verse) => {
            if app.is_selected(&verse) {
                debug!("Deselecting {}", verse.reference);
                app.selected = None;
            } else {
                debug!("Selecting {}", verse.reference);
                app.selected = Some(verse);
            }
            Effect::None
        }
        Action::CopyVerse(verse) => {
            // The copy affordance only exists on the selected verse
            if app.is_selected(&verse) {
                Effect::WriteClipboard(verse)
            } else {
                debug!("Ignoring copy of unselected verse {}", verse.reference);
                Effect::None
            }
        }
        Action::CopySucceeded(reference) => {
            let ticket = app.copy_feedback.mark(reference);
            info!("Copied {} to clipboard", reference);
            Effect::ScheduleCopyClear(ticket)
        }
        Action::CopyFailed(reason) => {
            warn!("Failed to copy text: {}", reason);
            Effect::None
        }
        Action::CopyFeedbackExpired(ticket) => {
            if !app.copy_feedback.expire(ticket) {
                debug!("Stale copy feedback expiry {:?} ignored", ticket);
            }
            Effect::None
        }
        Action::SelectTone(tone) => {
            app.prayer.select_tone(tone);
            Effect::None
        }
        Action::NextTone => {
            app.prayer.select_tone(app.prayer.tone.next());
            Effect::None
        }
        Action::PrevTone => {
            app.prayer.select_tone(app.prayer.tone.prev());
            Effect::None
        }
        Action::InsertText(text) => {
            app.prayer.insert_str(&text);
            Effect::None
        }
        Action::Backspace => {
            app.prayer.backspace();
            Effect::None
        }
        Action::SubmitPrayer => match app.prayer.submit() {
            Some(request) => {
                app.status_message = "生成中...".to_string();
                Effect::SpawnGeneration(request)
            }
            None => Effect::None,
        },
        Action::PrayerGenerated(text) => {
            app.prayer.succeed(text);
            app.status_message.clear();
            Effect::None
        }
        Action::PrayerFailed(cause) => {
            warn!("Prayer generation failed: {}", cause);
            app.prayer.fail();
            app.status_message.clear();
            Effect::None
        }
        Action::ToggleOverlay { viewport } => {
            app.overlay.toggle(viewport);
            Effect::None
        }
        Action::CloseOverlay => {
            app.overlay.close();
            Effect::None
        }
        Action::PointerDown { col, row } => {
            if app.overlay.on_close_control(col, row) {
                app.overlay.close();
            } else {
                app.overlay.pointer_down(col, row);
            }
            Effect::None
        }
        Action::PointerMoved { col, row } => {
            app.overlay.pointer_move(col, row);
            Effect::None
        }
        Action::PointerUp => {
            app.overlay.pointer_up();
            Effect::None
        }
        Action::OpenMusic => {
            if app.overlay.visible {
                Effect::OpenUrl(app.music_url.clone())
            } else {
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PSALM_139;
    use crate::core::prayer::{GENERATION_FAILED_MESSAGE, PRAYER_VERSE};
    use crate::test_support::test_app;

    fn verse(section: usize, index: usize) -> Verse {
        PSALM_139[section].verses[index]
    }

    #[test]
    fn test_activate_toggles_selection() {
        let mut app = test_app();
        let a = verse(0, 0);
        update(&mut app, Action::ActivateVerse(a));
        assert_eq!(app.selected, Some(a));
        update(&mut app, Action::ActivateVerse(a));
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_selection_is_global_across_sections() {
        let mut app = test_app();
        let a = verse(0, 1);
        let b = verse(3, 0);
        update(&mut app, Action::ActivateVerse(a));
        update(&mut app, Action::ActivateVerse(b));
        assert_eq!(app.selected, Some(b));
        assert!(!app.is_selected(&a));
    }

    #[test]
    fn test_copy_requires_selection() {
        let mut app = test_app();
        let a = verse(0, 4);
        assert_eq!(update(&mut app, Action::CopyVerse(a)), Effect::None);
        update(&mut app, Action::ActivateVerse(a));
        assert_eq!(update(&mut app, Action::CopyVerse(a)), Effect::WriteClipboard(a));
    }

    #[test]
    fn test_copy_success_marks_and_expiry_clears() {
        let mut app = test_app();
        let effect = update(&mut app, Action::CopySucceeded("139:5"));
        let Effect::ScheduleCopyClear(ticket) = effect else {
            panic!("expected ScheduleCopyClear, got {:?}", effect);
        };
        assert_eq!(app.copy_feedback.active(), Some("139:5"));
        update(&mut app, Action::CopyFeedbackExpired(ticket));
        assert_eq!(app.copy_feedback.active(), None);
    }

    #[test]
    fn test_copy_markers_never_overlap() {
        let mut app = test_app();
        let Effect::ScheduleCopyClear(first) = update(&mut app, Action::CopySucceeded("139:1"))
        else {
            panic!("expected ScheduleCopyClear");
        };
        let Effect::ScheduleCopyClear(second) = update(&mut app, Action::CopySucceeded("139:2"))
        else {
            panic!("expected ScheduleCopyClear");
        };
        assert_eq!(app.copy_feedback.active(), Some("139:2"));

        // The first timer fires while the second marker is up
        update(&mut app, Action::CopyFeedbackExpired(first));
        assert_eq!(app.copy_feedback.active(), Some("139:2"));

        update(&mut app, Action::CopyFeedbackExpired(second));
        assert_eq!(app.copy_feedback.active(), None);
    }

    #[test]
    fn test_copy_failure_changes_nothing() {
        let mut app = test_app();
        let effect = update(&mut app, Action::CopyFailed("no terminal".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(app.copy_feedback.active().is_none());
    }

    #[test]
    fn test_submit_twice_spawns_once() {
        let mut app = test_app();
        update(&mut app, Action::InsertText("我很焦慮".to_string()));
        let first = update(&mut app, Action::SubmitPrayer);
        let second = update(&mut app, Action::SubmitPrayer);
        assert!(matches!(first, Effect::SpawnGeneration(_)));
        assert_eq!(second, Effect::None);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::InsertText("  ".to_string()));
        assert_eq!(update(&mut app, Action::SubmitPrayer), Effect::None);
        assert!(!app.prayer.is_loading);
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_scenario_success() {
        let mut app = test_app();
        update(&mut app, Action::InsertText("我很焦慮".to_string()));
        update(&mut app, Action::SelectTone(Tone::Supplication));
        let effect = update(&mut app, Action::SubmitPrayer);
        assert_eq!(
            effect,
            Effect::SpawnGeneration(PrayerRequest {
                user_input: "我很焦慮".to_string(),
                tone: Tone::Supplication,
                verse: PRAYER_VERSE,
            })
        );
        update(&mut app, Action::PrayerGenerated("主啊，求你安慰我...".to_string()));
        assert!(!app.prayer.is_loading);
        assert!(app.prayer.error.is_none());
        assert_eq!(app.prayer.result.as_deref(), Some("主啊，求你安慰我..."));
    }

    #[test]
    fn test_scenario_failure() {
        let mut app = test_app();
        update(&mut app, Action::InsertText("我很焦慮".to_string()));
        update(&mut app, Action::SubmitPrayer);
        update(&mut app, Action::PrayerFailed("network error".to_string()));
        assert!(!app.prayer.is_loading);
        assert!(app.prayer.result.is_none());
        assert_eq!(app.prayer.error.as_deref(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn test_tone_change_allowed_while_loading() {
        let mut app = test_app();
        update(&mut app, Action::InsertText("x".to_string()));
        update(&mut app, Action::SubmitPrayer);
        update(&mut app, Action::NextTone);
        assert_eq!(app.prayer.tone, Tone::Thanksgiving);
        update(&mut app, Action::PrevTone);
        update(&mut app, Action::PrevTone);
        assert_eq!(app.prayer.tone, Tone::Repentance);
    }

    #[test]
    fn test_pointer_down_on_close_control_closes_overlay() {
        let mut app = test_app();
        update(&mut app, Action::ToggleOverlay { viewport: (120, 40) });
        let (start, _) = app.overlay.close_control_span();
        let row = app.overlay.position.y as u16;
        update(&mut app, Action::PointerDown { col: start as u16, row });
        assert!(!app.overlay.visible);
    }

    #[test]
    fn test_drag_through_actions() {
        let mut app = test_app();
        update(&mut app, Action::ToggleOverlay { viewport: (120, 40) });
        let before = app.overlay.position;
        update(&mut app, Action::PointerDown { col: 40, row: 16 });
        update(&mut app, Action::PointerMoved { col: 30, row: 10 });
        update(&mut app, Action::PointerUp);
        assert_eq!(app.overlay.position.x, before.x - 10);
        assert_eq!(app.overlay.position.y, before.y - 6);
        assert!(!app.overlay.is_dragging());
    }

    #[test]
    fn test_open_music_only_when_visible() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::OpenMusic), Effect::None);
        update(&mut app, Action::ToggleOverlay { viewport: (80, 24) });
        let url = app.music_url.clone();
        assert_eq!(update(&mut app, Action::OpenMusic), Effect::OpenUrl(url));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
