use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Widget};

use crate::core::content::{Verse, VerseSection};
use crate::tui::components::text_wrap::{self, VERTICAL_OVERHEAD};

/// Columns reserved in front of each verse for its number.
const LABEL_COLS: u16 = 4;
/// Columns reserved at the right edge of every verse for the copy affordance.
/// Reserved for unselected verses too, so selecting never reflows the card.
pub const AFFORDANCE_COLS: u16 = 9;

pub const COPY_LABEL: &str = "[複製]";
pub const COPIED_LABEL: &str = "[已複製]";

const ACCENT: Color = Color::Cyan;

/// One themed section rendered as a rounded card.
///
/// Like the other list children this is a transient widget: the parent
/// builds it each frame with the current selection and copy marker, and
/// uses [`calculate_height`](Self::calculate_height) and
/// [`verse_heights`](Self::verse_heights) for layout and hit testing.
#[derive(Clone, Copy)]
pub struct VerseCard<'a> {
    pub section: &'a VerseSection,
    /// Reference of the globally selected verse, if any
    pub selected: Option<&'a str>,
    /// Reference currently showing the "copied" marker, if any
    pub copied: Option<&'a str>,
    /// Index of the verse under the keyboard cursor within this section
    pub cursor: Option<usize>,
}

impl<'a> VerseCard<'a> {
    /// Width available to the verse text itself.
    fn text_width(width: u16) -> u16 {
        text_wrap::inner_width(width).saturating_sub(LABEL_COLS + AFFORDANCE_COLS)
    }

    /// Rows each verse occupies at the given card width.
    pub fn verse_heights(section: &VerseSection, width: u16) -> Vec<u16> {
        let text_width = Self::text_width(width);
        section
            .verses
            .iter()
            .map(|verse| text_wrap::wrap_line_count(verse.text, text_width))
            .collect()
    }

    pub fn calculate_height(section: &VerseSection, width: u16) -> u16 {
        if text_wrap::inner_width(width) == 0 {
            return 1;
        }
        Self::verse_heights(section, width).iter().sum::<u16>() + VERTICAL_OVERHEAD
    }

    /// Column range (relative to the card's left edge) holding the copy
    /// affordance.
    pub fn affordance_columns(width: u16) -> std::ops::Range<u16> {
        let inner_end = width.saturating_sub(2); // right border + padding
        inner_end.saturating_sub(AFFORDANCE_COLS)..inner_end
    }

    fn verse_lines(&self, index: usize, verse: &Verse, text_width: u16) -> Vec<Line<'static>> {
        let is_selected = self.selected == Some(verse.reference);
        let is_cursor = self.cursor == Some(index);

        let mut text_style = Style::default();
        if is_selected {
            text_style = text_style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        if is_cursor {
            text_style = text_style.add_modifier(Modifier::UNDERLINED);
        }

        let label = format!("{:>3} ", verse.display_label());
        let label_style = Style::default().fg(ACCENT).add_modifier(Modifier::DIM);

        text_wrap::wrap_lines(verse.text, text_width)
            .into_iter()
            .enumerate()
            .map(|(row, text)| {
                let prefix = if row == 0 {
                    Span::styled(label.clone(), label_style)
                } else {
                    Span::raw(" ".repeat(LABEL_COLS as usize))
                };
                Line::from(vec![prefix, Span::styled(text, text_style)])
            })
            .collect()
    }
}

impl<'a> Widget for VerseCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = Style::default().fg(Color::DarkGray);
        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.section.theme),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let text_width = Self::text_width(area.width);
        let affordance = Self::affordance_columns(area.width);
        let mut y = inner.y;

        for (index, verse) in self.section.verses.iter().enumerate() {
            let lines = self.verse_lines(index, verse, text_width);
            let first_row = y;
            for line in lines {
                if y >= inner.bottom() {
                    return;
                }
                buf.set_line(inner.x, y, &line, inner.width);
                y += 1;
            }

            if self.selected == Some(verse.reference) {
                let (label, style) = if self.copied == Some(verse.reference) {
                    (COPIED_LABEL, Style::default().fg(Color::Green))
                } else {
                    (COPY_LABEL, Style::default().fg(Color::Gray))
                };
                let label_width = text_wrap::display_width(label);
                let x = area.x + affordance.end.saturating_sub(label_width);
                buf.set_string(x, first_row, label, style);
            }
        }
    }
}
