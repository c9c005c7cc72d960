//! # PrayerPanel Component
//!
//! The prayer generator form: intro, the Psalm 139:23-24 quote, tone chips,
//! the free-text input, the submit button, and the outcome.
//!
//! The panel pre-builds its lines in [`PanelLayout::build`] so the reader
//! can ask for its height and for the rows and columns of clickable
//! controls without rendering.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Widget};

use crate::core::prayer::{PRAYER_VERSE, PrayerForm, PrayerOutcome, Tone};
use crate::tui::components::text_wrap::{self, VERTICAL_OVERHEAD};

pub const PANEL_TITLE: &str = " 個人化的禱告 ";
const INTRO: &str =
    "默想這段經文，選擇一個禱告語氣，然後寫下你的感受或思緒，我們將為你生成一段個人化的禱告。";
const TONE_PROMPT: &str = "選擇禱告語氣：";
pub const PLACEHOLDER: &str = "寫下你的思緒或感受...";
pub const SUBMIT_LABEL: &str = "[ 生成禱告 ]";
pub const LOADING_LABEL: &str = "生成中...";
const RESULT_HEADING: &str = "你的禱告：";

const QUOTE_PREFIX: &str = "│ ";
const INPUT_PREFIX: &str = "> ";
const CARET: &str = "█";
const ELLIPSIS: &str = "…";

/// Input rows shown at most; earlier rows collapse into one ellipsis row.
pub const MAX_INPUT_ROWS: usize = 8;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const ACCENT: Color = Color::Cyan;

/// Left edge of panel content: border + padding.
const CONTENT_X: u16 = 2;

/// Row index clamped into `u16`.
fn row_index(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

/// Pre-built panel content plus the positions of its interactive rows.
///
/// Rows are relative to the first content row (inside the top border);
/// columns are relative to the panel's left edge.
pub struct PanelLayout {
    pub lines: Vec<Line<'static>>,
    pub tone_row: u16,
    pub tone_chips: Vec<(Tone, Range<u16>)>,
    pub input_rows: Range<u16>,
    pub button_row: u16,
    pub button_columns: Range<u16>,
}

impl PanelLayout {
    pub fn build(form: &PrayerForm, width: u16, focused: bool, spinner_frame: usize) -> Self {
        let inner = text_wrap::inner_width(width);
        let mut lines: Vec<Line<'static>> = Vec::new();

        let muted = Style::default().fg(Color::Gray);
        for line in text_wrap::wrap_lines(INTRO, inner) {
            lines.push(Line::styled(line, muted));
        }
        lines.push(Line::default());

        let quote_style = Style::default().add_modifier(Modifier::ITALIC);
        let quote_width = inner.saturating_sub(text_wrap::display_width(QUOTE_PREFIX));
        for line in text_wrap::wrap_lines(PRAYER_VERSE.text, quote_width) {
            lines.push(Line::from(vec![
                Span::styled(QUOTE_PREFIX, Style::default().fg(ACCENT)),
                Span::styled(line, quote_style),
            ]));
        }
        lines.push(Line::styled(PRAYER_VERSE.reference, Style::default().fg(ACCENT)).right_aligned());
        lines.push(Line::default());

        // Tone chips
        let tone_row = row_index(lines.len());
        let mut spans = vec![Span::styled(
            TONE_PROMPT,
            Style::default().add_modifier(Modifier::BOLD),
        )];
        let mut x = CONTENT_X + text_wrap::display_width(TONE_PROMPT);
        let mut tone_chips = Vec::with_capacity(Tone::ALL.len());
        for tone in Tone::ALL {
            let chip = format!(" {} ", tone.label());
            let chip_width = text_wrap::display_width(&chip);
            let style = if tone == form.tone {
                Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(Color::DarkGray)
            };
            tone_chips.push((tone, x..x + chip_width));
            spans.push(Span::styled(chip, style));
            spans.push(Span::raw(" "));
            x += chip_width + 1;
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());

        // Input
        let input_start = row_index(lines.len());
        let input_width = inner.saturating_sub(text_wrap::display_width(INPUT_PREFIX) + 1);
        let prefix_style = if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if form.user_input.is_empty() {
            let mut spans = vec![Span::styled(INPUT_PREFIX, prefix_style)];
            if focused && !form.is_loading {
                spans.push(Span::raw(CARET));
            }
            spans.push(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
            lines.push(Line::from(spans));
        } else {
            let text_style = if form.is_loading {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let wrapped = text_wrap::wrap_lines(&form.user_input, input_width);
            let last = wrapped.len() - 1;
            // Keep the tail visible, where the caret is
            let hidden = if wrapped.len() > MAX_INPUT_ROWS {
                wrapped.len() - (MAX_INPUT_ROWS - 1)
            } else {
                0
            };
            if hidden > 0 {
                lines.push(Line::from(vec![
                    Span::styled(INPUT_PREFIX, prefix_style),
                    Span::styled(ELLIPSIS, Style::default().fg(Color::DarkGray)),
                ]));
            }
            for (i, line) in wrapped.into_iter().enumerate().skip(hidden) {
                let mut spans = vec![
                    Span::styled(INPUT_PREFIX, prefix_style),
                    Span::styled(line, text_style),
                ];
                if i == last && focused && !form.is_loading {
                    spans.push(Span::raw(CARET));
                }
                lines.push(Line::from(spans));
            }
        }
        let input_rows = input_start..row_index(lines.len());
        lines.push(Line::default());

        // Submit button or spinner
        let button_row = row_index(lines.len());
        let button_columns;
        if form.is_loading {
            let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(ACCENT)),
                Span::styled(LOADING_LABEL, Style::default().fg(ACCENT)),
            ]));
            button_columns = CONTENT_X..CONTENT_X;
        } else {
            let style = if form.can_submit() {
                Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(SUBMIT_LABEL, style)));
            button_columns = CONTENT_X..CONTENT_X + text_wrap::display_width(SUBMIT_LABEL);
        }

        match form.outcome() {
            PrayerOutcome::Failure(message) => {
                lines.push(Line::default());
                for line in text_wrap::wrap_lines(message, inner) {
                    lines.push(Line::styled(line, Style::default().fg(Color::Red)));
                }
            }
            PrayerOutcome::Success(prayer) => {
                lines.push(Line::default());
                lines.push(Line::styled(
                    RESULT_HEADING,
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ));
                for line in text_wrap::wrap_lines(prayer, inner) {
                    lines.push(Line::raw(line));
                }
            }
            PrayerOutcome::Idle | PrayerOutcome::Pending => {}
        }

        Self {
            lines,
            tone_row,
            tone_chips,
            input_rows,
            button_row,
            button_columns,
        }
    }

    pub fn height(&self) -> u16 {
        row_index(self.lines.len()).saturating_add(VERTICAL_OVERHEAD)
    }

    /// Tone chip under the given panel-relative position, if any.
    pub fn tone_at(&self, row: u16, col: u16) -> Option<Tone> {
        if row != self.tone_row {
            return None;
        }
        self.tone_chips
            .iter()
            .find(|(_, cols)| cols.contains(&col))
            .map(|(tone, _)| *tone)
    }

    pub fn on_button(&self, row: u16, col: u16) -> bool {
        row == self.button_row && self.button_columns.contains(&col)
    }
}

/// Renders a pre-built [`PanelLayout`] inside the panel border.
pub struct PrayerPanel<'a> {
    pub layout: &'a PanelLayout,
    pub focused: bool,
}

impl<'a> Widget for PrayerPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(Span::styled(
                PANEL_TITLE,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        for (i, line) in self.layout.lines.iter().enumerate() {
            let y = inner.y.saturating_add(row_index(i));
            if y >= inner.bottom() {
                break;
            }
            line.render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}
