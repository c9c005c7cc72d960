//! # Prayer Form
//!
//! State for the personalized-prayer panel: the reader's reflection, the
//! chosen tone, and the outcome of the last generation request.
//!
//! ```text
//!   Idle ──submit──▶ Pending ──ok──▶ Success(text)
//!     ▲                 │
//!     │                 └──err──▶ Failure(GENERATION_FAILED_MESSAGE)
//!     └────────── next submit resets error/result ──────────┘
//! ```
//!
//! `is_loading` is the only in-flight guard: while it is set, `submit()`
//! and text edits are ignored. Tone changes are always accepted; the tone
//! used by a request is the one captured into its `PrayerRequest`.

use crate::core::content::Verse;

/// The verse every prayer is grounded on. Deliberately independent of the
/// verse the reader has selected in the list.
pub const PRAYER_VERSE: Verse = Verse {
    reference: "詩篇 139:23-24",
    text: "神啊，求你鑒察我，知道我的心思，試煉我，知道我的意念，看在我裏面有甚麼惡行沒有，引導我走永生的道路。",
};

/// Shown for every generation failure, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str = "無法生成禱告。請稍後再試。";

/// Rhetorical style applied to the generated prayer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    /// Supplication
    #[default]
    Supplication,
    /// Thanksgiving
    Thanksgiving,
    /// Repentance
    Repentance,
}

impl Tone {
    /// All tones in display order.
    pub const ALL: [Tone; 3] = [Tone::Supplication, Tone::Thanksgiving, Tone::Repentance];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Supplication => "祈求",
            Tone::Thanksgiving => "感恩",
            Tone::Repentance => "悔改",
        }
    }

    /// Cycles to the next tone (wraps around)
    pub fn next(self) -> Tone {
        match self {
            Tone::Supplication => Tone::Thanksgiving,
            Tone::Thanksgiving => Tone::Repentance,
            Tone::Repentance => Tone::Supplication,
        }
    }

    /// Cycles to the previous tone (wraps around)
    pub fn prev(self) -> Tone {
        match self {
            Tone::Supplication => Tone::Repentance,
            Tone::Thanksgiving => Tone::Supplication,
            Tone::Repentance => Tone::Thanksgiving,
        }
    }
}

/// Everything the generation service needs for one prayer.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerRequest {
    pub user_input: String,
    pub tone: Tone,
    pub verse: Verse,
}

/// Derived view of the form's outcome fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrayerOutcome<'a> {
    Idle,
    Pending,
    Success(&'a str),
    Failure(&'a str),
}

#[derive(Debug, Default)]
pub struct PrayerForm {
    pub user_input: String,
    pub tone: Tone,
    pub is_loading: bool,
    pub error: Option<String>,
    pub result: Option<String>,
}

impl PrayerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    /// Whether `submit()` would start a request right now.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.user_input.trim().is_empty()
    }

    /// Starts a request, or returns `None` when the input is blank or a
    /// request is already in flight (no state change in that case).
    pub fn submit(&mut self) -> Option<PrayerRequest> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.result = None;
        self.is_loading = true;
        Some(PrayerRequest {
            user_input: self.user_input.clone(),
            tone: self.tone,
            verse: PRAYER_VERSE,
        })
    }

    pub fn succeed(&mut self, text: String) {
        self.is_loading = false;
        self.result = Some(text);
    }

    pub fn fail(&mut self) {
        self.is_loading = false;
        self.result = None;
        self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
    }

    /// Appends text to the reflection. Ignored while loading.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if self.is_loading {
            return false;
        }
        self.user_input.push_str(text);
        true
    }

    /// Removes the last character of the reflection. Ignored while loading.
    pub fn backspace(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.user_input.pop().is_some()
    }

    pub fn outcome(&self) -> PrayerOutcome<'_> {
        if self.is_loading {
            PrayerOutcome::Pending
        } else if let Some(error) = &self.error {
            PrayerOutcome::Failure(error)
        } else if let Some(result) = &self.result {
            PrayerOutcome::Success(result)
        } else {
            PrayerOutcome::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_cycle() {
        assert_eq!(Tone::Supplication.next(), Tone::Thanksgiving);
        assert_eq!(Tone::Thanksgiving.next(), Tone::Repentance);
        assert_eq!(Tone::Repentance.next(), Tone::Supplication);
        for tone in Tone::ALL {
            assert_eq!(tone.next().prev(), tone);
        }
    }

    #[test]
    fn test_tone_labels_in_display_order() {
        let labels: Vec<_> = Tone::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["祈求", "感恩", "悔改"]);
        assert_eq!(Tone::default(), Tone::Supplication);
    }

    #[test]
    fn test_select_tone_leaves_exactly_one_active() {
        let mut form = PrayerForm::new();
        form.select_tone(Tone::Supplication);
        form.select_tone(Tone::Thanksgiving);
        assert_eq!(form.tone, Tone::Thanksgiving);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut form = PrayerForm::new();
        form.user_input = "   \n\t ".to_string();
        form.result = Some("previous".to_string());

        assert!(form.submit().is_none());
        assert!(!form.is_loading);
        assert_eq!(form.result.as_deref(), Some("previous"));
        assert!(form.error.is_none());
    }

    #[test]
    fn test_submit_captures_request_and_resets_outcome() {
        let mut form = PrayerForm::new();
        form.user_input = "我很焦慮".to_string();
        form.error = Some("old".to_string());
        form.result = Some("old".to_string());

        let request = form.submit().expect("request");
        assert_eq!(request.user_input, "我很焦慮");
        assert_eq!(request.tone, Tone::Supplication);
        assert_eq!(request.verse, PRAYER_VERSE);
        assert!(form.is_loading);
        assert!(form.error.is_none());
        assert!(form.result.is_none());
        assert_eq!(form.outcome(), PrayerOutcome::Pending);
    }

    #[test]
    fn test_second_submit_while_loading_is_rejected() {
        let mut form = PrayerForm::new();
        form.user_input = "hello".to_string();
        assert!(form.submit().is_some());
        assert!(form.submit().is_none());
    }

    #[test]
    fn test_tone_change_while_loading_does_not_touch_request() {
        let mut form = PrayerForm::new();
        form.user_input = "hello".to_string();
        let request = form.submit().unwrap();
        form.select_tone(Tone::Repentance);
        assert_eq!(request.tone, Tone::Supplication);
        assert_eq!(form.tone, Tone::Repentance);
    }

    #[test]
    fn test_edits_ignored_while_loading() {
        let mut form = PrayerForm::new();
        form.insert_str("ab");
        form.submit();
        assert!(!form.insert_str("c"));
        assert!(!form.backspace());
        assert_eq!(form.user_input, "ab");
    }

    #[test]
    fn test_fail_sets_fixed_message() {
        let mut form = PrayerForm::new();
        form.user_input = "x".to_string();
        form.submit();
        form.fail();
        assert!(!form.is_loading);
        assert!(form.result.is_none());
        assert_eq!(form.outcome(), PrayerOutcome::Failure(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn test_backspace_removes_whole_cjk_char() {
        let mut form = PrayerForm::new();
        form.insert_str("我很");
        assert!(form.backspace());
        assert_eq!(form.user_input, "我");
    }
}
