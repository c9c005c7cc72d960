//! Pure text wrapping utilities shared by the verse cards and the prayer panel.
//!
//! Components render pre-wrapped lines (no `Paragraph` wrapping) so that the
//! row counts used for layout and hit testing are exactly what is drawn.
//! Widths are display columns: CJK characters count as two.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by a bordered card
pub const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub const VERTICAL_OVERHEAD: u16 = 2;

/// Build textwrap options for the given inner width.
pub fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` to `width` columns. Always returns at least one line, and
/// keeps the empty line a trailing newline implies.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    // textwrap doesn't always produce an empty trailing line for a trailing newline
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Number of rows `text` occupies at `width` columns.
pub fn wrap_line_count(text: &str, width: u16) -> u16 {
    u16::try_from(wrap_lines(text, width).len()).unwrap_or(u16::MAX)
}

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}
