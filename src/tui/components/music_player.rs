//! # MusicPlayer Component
//!
//! Floating "背景音樂" panel drawn over everything else.
//!
//! The overlay position is unclamped and may be partly (or wholly) off
//! screen after a drag, so the panel is drawn into a scratch buffer of its
//! own size and only the cells that land inside the frame are copied over.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Widget, Wrap};

use crate::core::overlay::{CLOSE_LABEL, OVERLAY_HEIGHT, OVERLAY_WIDTH, OverlayState};
use crate::tui::component::Component;

pub const PLAYER_TITLE: &str = " ♪ 背景音樂 ";
const OPEN_HINT: &str = "按 o 在瀏覽器中播放 · 拖曳標題列移動";

/// Props-only component; position and visibility come from `OverlayState`.
pub struct MusicPlayer<'a> {
    pub overlay: &'a OverlayState,
    pub music_url: &'a str,
}

impl<'a> MusicPlayer<'a> {
    /// Draw the panel at the origin of a buffer the size of the overlay.
    fn draw_panel(&self) -> Buffer {
        let area = Rect::new(0, 0, OVERLAY_WIDTH, OVERLAY_HEIGHT);
        let mut buf = Buffer::empty(area);

        let accent = Style::default().fg(Color::Cyan);
        let border_style = if self.overlay.is_dragging() {
            accent.add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::bordered()
            .title(Span::styled(PLAYER_TITLE, accent.add_modifier(Modifier::BOLD)))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        Clear.render(area, &mut buf);
        block.render(area, &mut buf);

        // Close control sits in the top border, right-aligned inside the corner
        let close_x = OVERLAY_WIDTH - 1 - CLOSE_LABEL.len() as u16;
        buf.set_string(close_x, 0, CLOSE_LABEL, Style::default().fg(Color::Red));

        let body = vec![
            Line::styled("Psalm 139 Music", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(self.music_url, Style::default().fg(Color::Blue)),
            Line::default(),
            Line::styled(OPEN_HINT, Style::default().fg(Color::DarkGray)),
        ];
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .render(inner, &mut buf);
        buf
    }
}

/// Copy the cells of `src` (anchored at `(x, y)`, possibly negative) that
/// fall inside `bounds`.
pub fn blit_clipped(src: &Buffer, x: i32, y: i32, dest: &mut Buffer, bounds: Rect) {
    let bounds = bounds.intersection(dest.area);
    for row in 0..src.area.height {
        let dy = y + i32::from(row);
        if dy < i32::from(bounds.top()) || dy >= i32::from(bounds.bottom()) {
            continue;
        }
        for col in 0..src.area.width {
            let dx = x + i32::from(col);
            if dx < i32::from(bounds.left()) || dx >= i32::from(bounds.right()) {
                continue;
            }
            dest[(dx as u16, dy as u16)] = src[(col, row)].clone();
        }
    }
}

impl<'a> Component for MusicPlayer<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.overlay.visible {
            return;
        }
        let panel = self.draw_panel();
        let position = self.overlay.position;
        let bounds = area.intersection(frame.area());
        blit_clipped(&panel, position.x, position.y, frame.buffer_mut(), bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::overlay::OverlayPosition;

    fn visible_overlay(x: i32, y: i32) -> OverlayState {
        let mut overlay = OverlayState::new();
        overlay.toggle((120, 40));
        overlay.position = OverlayPosition { x, y };
        overlay
    }

    #[test]
    fn test_close_label_matches_hit_span() {
        let overlay = visible_overlay(10, 5);
        let player = MusicPlayer {
            overlay: &overlay,
            music_url: "https://example.com/music",
        };
        let panel = player.draw_panel();
        let (start, end) = overlay.close_control_span();
        let label: String = (start..end)
            .map(|x| panel[((x - 10) as u16, 0)].symbol().to_string())
            .collect();
        assert_eq!(label, CLOSE_LABEL);
    }

    #[test]
    fn test_blit_clips_negative_origin() {
        let mut src = Buffer::empty(Rect::new(0, 0, 4, 2));
        src.set_string(0, 0, "abcd", Style::default());
        src.set_string(0, 1, "efgh", Style::default());
        let mut dest = Buffer::empty(Rect::new(0, 0, 5, 5));

        let bounds = dest.area;
        blit_clipped(&src, -2, -1, &mut dest, bounds);
        assert_eq!(dest[(0, 0)].symbol(), "g");
        assert_eq!(dest[(1, 0)].symbol(), "h");
        assert_eq!(dest[(2, 0)].symbol(), " ");
    }

    #[test]
    fn test_blit_clips_past_right_and_bottom() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 3));
        src.set_string(0, 0, "xyz", Style::default());
        let mut dest = Buffer::empty(Rect::new(0, 0, 4, 4));

        let bounds = dest.area;
        blit_clipped(&src, 2, 3, &mut dest, bounds);
        assert_eq!(dest[(2, 3)].symbol(), "x");
        assert_eq!(dest[(3, 3)].symbol(), "y");
    }

    #[test]
    fn test_entirely_off_screen_is_a_no_op() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 1));
        src.set_string(0, 0, "xyz", Style::default());
        let mut dest = Buffer::empty(Rect::new(0, 0, 4, 4));
        let before = dest.clone();

        let bounds = dest.area;
        blit_clipped(&src, -100, 200, &mut dest, bounds);
        assert_eq!(dest, before);
    }
}
