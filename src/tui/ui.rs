use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{MusicPlayer, Reader, TitleBar};
use crate::tui::{Focus, TuiState};

const VERSES_HELP: &str =
    "↑/↓ 移動  Enter 選取  c 複製  Tab 禱告  m/F2 音樂  o 開啟音樂  q 離開";
const PRAYER_HELP: &str = "輸入文字  ←/→ 語氣  Enter 生成  Ctrl+J 換行  Tab/Esc 經文  F2 音樂";

pub fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Verses => VERSES_HELP,
        Focus::Prayer => PRAYER_HELP,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let full = frame.area();
    tui.viewport = (full.width, full.height);

    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(full);

    let mut title_bar = TitleBar::new(
        app.model_name.clone(),
        app.status_message.clone(),
        app.overlay.visible,
    );
    title_bar.render(frame, title_area);

    let mut reader = Reader {
        state: &mut tui.reader,
        app,
        prayer_focused: tui.focus == Focus::Prayer,
        spinner_frame,
    };
    reader.render(frame, main_area);

    frame.render_widget(
        Line::styled(help_text(tui.focus), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlay last so it sits above everything
    let mut player = MusicPlayer {
        overlay: &app.overlay,
        music_url: &app.music_url,
    };
    player.render(frame, full);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draw_records_viewport_and_layout() {
        let app = test_app();
        let mut tui = TuiState::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        assert_eq!(tui.viewport, (100, 30));
        // Reader occupies everything between title and help bars
        assert_eq!(tui.reader.area.y, 1);
        assert_eq!(tui.reader.area.height, 28);
        assert!(!tui.reader.layout.blocks.is_empty());
        assert!(screen_text(&terminal).contains("model: test-model"));
    }

    #[test]
    fn test_overlay_drawn_at_its_position() {
        let mut app = test_app();
        update(&mut app, Action::ToggleOverlay { viewport: (100, 30) });
        let mut tui = TuiState::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();

        let (start, _) = app.overlay.close_control_span();
        let buffer = terminal.backend().buffer();
        let y = app.overlay.position.y as u16;
        assert_eq!(buffer[(start as u16, y)].symbol(), "[");
        assert_eq!(buffer[(start as u16 + 1, y)].symbol(), "x");
    }

    #[test]
    fn test_overlay_dragged_off_screen_does_not_panic() {
        let mut app = test_app();
        update(&mut app, Action::ToggleOverlay { viewport: (100, 30) });
        app.overlay.position.x = -30;
        app.overlay.position.y = 27;
        let mut tui = TuiState::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();
    }

    #[test]
    fn test_help_bar_follows_focus() {
        assert!(help_text(Focus::Verses).contains("複製"));
        assert!(help_text(Focus::Prayer).contains("語氣"));
    }
}
