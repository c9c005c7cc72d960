//! # TitleBar Component
//!
//! Top status bar: app name, the generation model, the current status
//! message, and a marker while the music player is open.
//!
//! Purely presentational. All three pieces of state come in as props:
//! `model_name` and `status_message` from the core `App`, `music_visible`
//! from the overlay state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const APP_NAME: &str = "詩篇 139";

pub struct TitleBar {
    pub model_name: String,
    pub status_message: String,
    pub music_visible: bool,
}

impl TitleBar {
    pub fn new(model_name: String, status_message: String, music_visible: bool) -> Self {
        Self {
            model_name,
            status_message,
            music_visible,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("{} (model: {})", APP_NAME, self.model_name);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.music_visible {
            text.push_str(" | ♪");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), Style::default().fg(Color::Cyan)));
        frame.render_widget(line, area);
    }
}
