//! Prompt template for prayer generation.
//!
//! The prompt is the whole payload: there is no separate system message.
//! It is written in Traditional Chinese and asks for a reply in the same
//! script, with no preamble or sign-off around the prayer.

use crate::core::content::Verse;
use crate::core::prayer::Tone;

/// Builds the instruction sent to the model.
pub fn build_prayer_prompt(user_input: &str, verse: &Verse, tone: Tone) -> String {
    format!(
        "你是一位充滿智慧與憐憫的屬靈導師。\n\
         一位使用者正在默想聖經詩篇中的這段經文：「{reference} - {text}」。\n\
         他們分享了他們個人的想法：「{user_input}」。\n\
         \n\
         請根據這段經文和他們的想法，以第一人稱為他們撰寫一段簡短、個人化且充滿鼓勵的禱告。\n\
         禱告的語氣應該是「{tone}」的語氣。\n\
         請直接提供禱告文，不要包含任何開頭或結尾的客套話。\n\
         請使用繁體中文。",
        reference = verse.reference,
        text = verse.text,
        tone = tone.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prayer::PRAYER_VERSE;

    #[test]
    fn test_prompt_embeds_all_inputs() {
        let prompt = build_prayer_prompt("我很焦慮", &PRAYER_VERSE, Tone::Thanksgiving);
        assert!(prompt.contains("詩篇 139:23-24"));
        assert!(prompt.contains(PRAYER_VERSE.text));
        assert!(prompt.contains("「我很焦慮」"));
        assert!(prompt.contains("「感恩」"));
        assert!(prompt.contains("繁體中文"));
    }

    #[test]
    fn test_user_input_is_not_trimmed_or_escaped() {
        let prompt = build_prayer_prompt("  line one\nline two  ", &PRAYER_VERSE, Tone::Supplication);
        assert!(prompt.contains("「  line one\nline two  」"));
    }
}
