//! # Reader Component
//!
//! The scrollable devotional page: header, one card per themed section,
//! the prayer panel, and a footer.
//!
//! ## Architecture
//!
//! `Reader` is a transient component (created each frame) that wraps
//! `&'a mut ReaderState` (persistent state) and the core `App` (props).
//! The layout is rebuilt on every render and kept in the state so mouse
//! events arriving between frames can be hit-tested against exactly what
//! is on screen.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::content::{self, PSALM_139, SUBTITLE, TITLE, Verse};
use crate::core::prayer::Tone;
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::prayer_panel::{PanelLayout, PrayerPanel};
use crate::tui::components::text_wrap;
use crate::tui::components::verse_card::VerseCard;
use crate::tui::event::TuiEvent;

pub const FOOTER: &str = "Crafted with contemplation. Inspired by Psalm 139.";

/// Blank rows between consecutive blocks.
const BLOCK_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Header,
    Section(usize),
    Prayer,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBlock {
    pub kind: BlockKind,
    pub top: u16,
    pub height: u16,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderHit {
    /// A verse row. `on_affordance` is true when the press was inside the
    /// columns reserved for the copy control.
    Verse { verse: Verse, on_affordance: bool },
    Tone(Tone),
    SubmitButton,
    PrayerInput,
    Prayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollTarget {
    Cursor,
    Prayer,
}

/// Layout measurements from the most recent render.
#[derive(Default)]
pub struct ReaderLayout {
    pub width: u16,
    pub blocks: Vec<LayoutBlock>,
    /// Row count of every verse, per section
    pub verse_rows: Vec<Vec<u16>>,
    pub panel: Option<PanelLayout>,
}

impl ReaderLayout {
    pub fn build(app: &App, width: u16, prayer_focused: bool, spinner_frame: usize) -> Self {
        let mut blocks = Vec::with_capacity(PSALM_139.len() + 3);
        let mut top = 0u16;
        let mut push = |kind: BlockKind, height: u16| {
            blocks.push(LayoutBlock { kind, top, height });
            top = top.saturating_add(height).saturating_add(BLOCK_GAP);
        };

        push(BlockKind::Header, Self::header_height(width));

        let mut verse_rows = Vec::with_capacity(PSALM_139.len());
        for (i, section) in PSALM_139.iter().enumerate() {
            push(BlockKind::Section(i), VerseCard::calculate_height(section, width));
            verse_rows.push(VerseCard::verse_heights(section, width));
        }

        let panel = PanelLayout::build(&app.prayer, width, prayer_focused, spinner_frame);
        push(BlockKind::Prayer, panel.height());
        push(BlockKind::Footer, 1);

        Self {
            width,
            blocks,
            verse_rows,
            panel: Some(panel),
        }
    }

    fn header_height(width: u16) -> u16 {
        // title + subtitle
        text_wrap::wrap_line_count(SUBTITLE, width).saturating_add(1)
    }

    pub fn total_height(&self) -> u16 {
        self.blocks.last().map_or(0, |b| b.top.saturating_add(b.height))
    }

    pub fn block(&self, kind: BlockKind) -> Option<&LayoutBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    fn block_at(&self, y: u16) -> Option<&LayoutBlock> {
        self.blocks
            .iter()
            .find(|b| y >= b.top && y < b.top.saturating_add(b.height))
    }

    /// Content rows `[top, bottom)` occupied by the verse at a global index.
    pub fn verse_span(&self, global_index: usize) -> Option<(u16, u16)> {
        let mut remaining = global_index;
        for (s, rows) in self.verse_rows.iter().enumerate() {
            if remaining < rows.len() {
                let block = self.block(BlockKind::Section(s))?;
                let offset: u16 = rows[..remaining].iter().sum();
                let top = block.top + 1 + offset; // +1 for the card's top border
                return Some((top, top + rows[remaining]));
            }
            remaining -= rows.len();
        }
        None
    }

    /// Hit test a content-space position (already adjusted for scrolling).
    pub fn hit(&self, x: u16, y: u16) -> Option<ReaderHit> {
        let block = self.block_at(y)?;
        let local_y = y - block.top;
        match block.kind {
            BlockKind::Section(s) => {
                // Skip the top and bottom borders
                if local_y == 0 || local_y + 1 >= block.height {
                    return None;
                }
                let mut row = local_y - 1;
                for (j, &height) in self.verse_rows.get(s)?.iter().enumerate() {
                    if row < height {
                        let verse = PSALM_139[s].verses[j];
                        let on_affordance = VerseCard::affordance_columns(self.width).contains(&x);
                        return Some(ReaderHit::Verse {
                            verse,
                            on_affordance,
                        });
                    }
                    row -= height;
                }
                None
            }
            BlockKind::Prayer => {
                let panel = self.panel.as_ref()?;
                if local_y == 0 {
                    return Some(ReaderHit::Prayer);
                }
                let row = local_y - 1;
                if let Some(tone) = panel.tone_at(row, x) {
                    Some(ReaderHit::Tone(tone))
                } else if panel.on_button(row, x) {
                    Some(ReaderHit::SubmitButton)
                } else if panel.input_rows.contains(&row) {
                    Some(ReaderHit::PrayerInput)
                } else {
                    Some(ReaderHit::Prayer)
                }
            }
            BlockKind::Header | BlockKind::Footer => None,
        }
    }
}

/// Persistent reader state. Lives in `TuiState`.
pub struct ReaderState {
    pub scroll_state: ScrollViewState,
    pub layout: ReaderLayout,
    /// Screen area of the last render, for mouse hit testing
    pub area: Rect,
    /// Global index of the verse under the keyboard cursor
    pub cursor: usize,
    pending_scroll: Option<ScrollTarget>,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: ReaderLayout::default(),
            area: Rect::default(),
            cursor: 0,
            pending_scroll: None,
        }
    }

    pub fn cursor_verse(&self) -> Option<Verse> {
        content::all_verses().nth(self.cursor).copied()
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.pending_scroll = Some(ScrollTarget::Cursor);
    }

    pub fn move_cursor_down(&mut self) {
        let last = content::verse_count().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
        self.pending_scroll = Some(ScrollTarget::Cursor);
    }

    /// Put the cursor on a verse (after a click) without scrolling.
    pub fn set_cursor_to(&mut self, verse: &Verse) {
        if let Some(index) = content::all_verses().position(|v| v.reference == verse.reference) {
            self.cursor = index;
        }
    }

    pub fn reveal_cursor(&mut self) {
        self.pending_scroll = Some(ScrollTarget::Cursor);
    }

    pub fn reveal_prayer(&mut self) {
        self.pending_scroll = Some(ScrollTarget::Prayer);
    }

    /// Hit test a screen position against the last rendered layout.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<ReaderHit> {
        if !self.area.contains(Position { x: col, y: row }) {
            return None;
        }
        let offset = self.scroll_state.offset().y;
        let x = col - self.area.x;
        let y = (row - self.area.y).saturating_add(offset);
        self.layout.hit(x, y)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self
            .layout
            .total_height()
            .saturating_sub(self.area.height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the minimum amount that makes `[top, bottom)` visible. Spans
    /// taller than the viewport are aligned to their top edge.
    fn scroll_into_view(&mut self, top: u16, bottom: u16) {
        let offset_y = self.scroll_state.offset().y;
        let height = self.area.height;
        if top < offset_y || bottom - top > height {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y.saturating_add(height) {
            self.scroll_state.set_offset(Position {
                x: 0,
                y: bottom.saturating_sub(height),
            });
        }
    }

    fn apply_pending_scroll(&mut self) {
        let span = match self.pending_scroll.take() {
            Some(ScrollTarget::Cursor) => self.layout.verse_span(self.cursor),
            Some(ScrollTarget::Prayer) => self
                .layout
                .block(BlockKind::Prayer)
                .map(|b| (b.top, b.top.saturating_add(b.height))),
            None => None,
        };
        if let Some((top, bottom)) = span {
            self.scroll_into_view(top, bottom);
        }
    }
}

/// Scrollable page component.
/// Created fresh each frame with references to state and data.
pub struct Reader<'a> {
    pub state: &'a mut ReaderState,
    pub app: &'a App,
    pub prayer_focused: bool,
    pub spinner_frame: usize,
}

impl<'a> Reader<'a> {
    fn render_header(scroll_view: &mut ScrollView, block: &LayoutBlock, width: u16) {
        let mut lines = vec![
            Line::styled(
                TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
            .centered(),
        ];
        for line in text_wrap::wrap_lines(SUBTITLE, width) {
            lines.push(Line::styled(line, Style::default().fg(Color::Gray)).centered());
        }
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, block.top, width, block.height),
        );
    }
}

impl<'a> Component for Reader<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Rebuild layout for the current width and state
        self.state.layout =
            ReaderLayout::build(self.app, content_width, self.prayer_focused, self.spinner_frame);
        self.state.area = area;

        // 2. Scroll adjustments
        self.state.clamp_scroll();
        self.state.apply_pending_scroll();

        // 3. Render blocks into the ScrollView
        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let selected = self.app.selected.map(|v| v.reference);
        let copied = self.app.copy_feedback.active();
        let cursor_verse = self.state.cursor_verse();

        for block in &self.state.layout.blocks {
            let rect = Rect::new(0, block.top, content_width, block.height);
            match block.kind {
                BlockKind::Header => Self::render_header(&mut scroll_view, block, content_width),
                BlockKind::Section(s) => {
                    let section = &PSALM_139[s];
                    let cursor = if self.prayer_focused {
                        None
                    } else {
                        cursor_verse.and_then(|cv| {
                            section.verses.iter().position(|v| v.reference == cv.reference)
                        })
                    };
                    let card = VerseCard {
                        section,
                        selected,
                        copied,
                        cursor,
                    };
                    scroll_view.render_widget(card, rect);
                }
                BlockKind::Prayer => {
                    if let Some(panel) = &self.state.layout.panel {
                        let widget = PrayerPanel {
                            layout: panel,
                            focused: self.prayer_focused,
                        };
                        scroll_view.render_widget(widget, rect);
                    }
                }
                BlockKind::Footer => {
                    scroll_view.render_widget(
                        Line::styled(FOOTER, Style::default().fg(Color::DarkGray)).centered(),
                        rect,
                    );
                }
            }
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Scrolling is handled on the persistent state; clicks need the core
/// `App` to resolve and are routed by the parent.
impl EventHandler for ReaderState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}
