//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `core::action::update` never performs I/O. It returns an `Effect`, and
//! [`dispatch`] carries it out here: clipboard writes happen inline (their
//! outcome is fed straight back as another action), while generation and the
//! copy-marker timer run as tokio tasks that report back over the `mpsc`
//! channel drained by the event loop.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background actions.

pub mod clipboard;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::process::{Command, Stdio};
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::copy_feedback::{COPY_FEEDBACK_DURATION, CopyTicket};
use crate::core::prayer::PrayerRequest;
use crate::core::state::App;
use crate::inference::{GeminiProvider, PrayerProvider, generate_prayer};
use crate::tui::clipboard::{Clipboard, Osc52Clipboard};
use crate::tui::component::EventHandler;
use crate::tui::components::{ReaderHit, ReaderState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the page receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Arrow keys move the verse cursor; single letters are commands.
    Verses,
    /// Typing edits the prayer reflection.
    Prayer,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub reader: ReaderState,
    pub focus: Focus,
    /// Terminal size at the last draw, used to centre the music overlay
    pub viewport: (u16, u16),
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            reader: ReaderState::new(),
            focus: Focus::Verses,
            viewport: (80, 24),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            debug!("Focus -> {:?}", focus);
            self.focus = focus;
        }
    }
}

/// What effects need from the outside world.
pub struct EffectContext {
    pub clipboard: Box<dyn Clipboard>,
    pub tx: mpsc::Sender<Action>,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the generation provider from a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn PrayerProvider> {
    Arc::new(GeminiProvider::new(
        config.api_key.clone(),
        config.base_url.clone(),
        config.model.clone(),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut ctx = EffectContext {
        clipboard: Box::new(Osc52Clipboard),
        tx,
    };

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.prayer.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &mut ctx) {
                break 'main;
            }
        }

        // Handle background task actions (generation results, copy-marker expiry)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &mut ctx) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Route one terminal event. Returns true when the app should quit.
pub fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    ctx: &mut EffectContext,
) -> bool {
    let action = match event {
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::ToggleMusic => Some(Action::ToggleOverlay {
            viewport: tui.viewport,
        }),

        // The overlay is on top, so it sees presses before the page does
        TuiEvent::MouseDown(col, row) if app.overlay.contains(col, row) => {
            Some(Action::PointerDown { col, row })
        }
        TuiEvent::MouseDown(col, row) => hit_to_action(app, tui, col, row),
        TuiEvent::MouseDrag(col, row) if app.overlay.is_dragging() => {
            Some(Action::PointerMoved { col, row })
        }
        TuiEvent::MouseDrag(..) => None,
        TuiEvent::MouseUp(..) => Some(Action::PointerUp),

        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.reader.handle_event(&event);
            None
        }

        TuiEvent::FocusNext => {
            match tui.focus {
                Focus::Verses => {
                    tui.set_focus(Focus::Prayer);
                    tui.reader.reveal_prayer();
                }
                Focus::Prayer => {
                    tui.set_focus(Focus::Verses);
                    tui.reader.reveal_cursor();
                }
            }
            None
        }

        _ => match tui.focus {
            Focus::Verses => verses_key(app, tui, event),
            Focus::Prayer => prayer_key(tui, event),
        },
    };

    match action {
        Some(action) => dispatch(app, action, ctx),
        None => false,
    }
}

fn verses_key(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::CursorUp => {
            tui.reader.move_cursor_up();
            None
        }
        TuiEvent::CursorDown => {
            tui.reader.move_cursor_down();
            None
        }
        TuiEvent::Submit | TuiEvent::InputChar(' ') => {
            tui.reader.cursor_verse().map(Action::ActivateVerse)
        }
        TuiEvent::InputChar('c') => app.selected.map(Action::CopyVerse),
        TuiEvent::InputChar('m') => Some(Action::ToggleOverlay {
            viewport: tui.viewport,
        }),
        TuiEvent::InputChar('o') => Some(Action::OpenMusic),
        TuiEvent::Escape if app.overlay.visible => Some(Action::CloseOverlay),
        TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
        _ => None,
    }
}

fn prayer_key(tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar(c) => Some(Action::InsertText(c.to_string())),
        TuiEvent::Paste(text) => Some(Action::InsertText(text)),
        TuiEvent::Backspace => Some(Action::Backspace),
        TuiEvent::CursorLeft => Some(Action::PrevTone),
        TuiEvent::CursorRight => Some(Action::NextTone),
        TuiEvent::Submit => Some(Action::SubmitPrayer),
        TuiEvent::Escape => {
            tui.set_focus(Focus::Verses);
            tui.reader.reveal_cursor();
            None
        }
        _ => None,
    }
}

fn hit_to_action(app: &App, tui: &mut TuiState, col: u16, row: u16) -> Option<Action> {
    match tui.reader.hit_test(col, row)? {
        ReaderHit::Verse {
            verse,
            on_affordance,
        } => {
            tui.set_focus(Focus::Verses);
            tui.reader.set_cursor_to(&verse);
            if on_affordance && app.is_selected(&verse) {
                Some(Action::CopyVerse(verse))
            } else {
                Some(Action::ActivateVerse(verse))
            }
        }
        ReaderHit::Tone(tone) => {
            tui.set_focus(Focus::Prayer);
            Some(Action::SelectTone(tone))
        }
        ReaderHit::SubmitButton => {
            tui.set_focus(Focus::Prayer);
            Some(Action::SubmitPrayer)
        }
        ReaderHit::PrayerInput | ReaderHit::Prayer => {
            tui.set_focus(Focus::Prayer);
            None
        }
    }
}

/// Apply an action and carry out the resulting effects. Returns true when
/// the app should quit.
pub fn dispatch(app: &mut App, action: Action, ctx: &mut EffectContext) -> bool {
    let mut pending = vec![action];
    while let Some(action) = pending.pop() {
        match update(app, action) {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::WriteClipboard(verse) => {
                match ctx.clipboard.write_text(&verse.clipboard_text()) {
                    Ok(()) => pending.push(Action::CopySucceeded(verse.reference)),
                    Err(e) => pending.push(Action::CopyFailed(e.to_string())),
                }
            }
            Effect::ScheduleCopyClear(ticket) => schedule_copy_clear(ticket, ctx.tx.clone()),
            Effect::SpawnGeneration(request) => {
                spawn_generation(app.provider.clone(), request, ctx.tx.clone())
            }
            Effect::OpenUrl(url) => open_url(&url),
        }
    }
    false
}

fn schedule_copy_clear(ticket: CopyTicket, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        tokio::time::sleep(COPY_FEEDBACK_DURATION).await;
        if tx.send(Action::CopyFeedbackExpired(ticket)).is_err() {
            debug!("Copy feedback expiry {:?} dropped: receiver gone", ticket);
        }
    });
}

fn spawn_generation(
    provider: Arc<dyn PrayerProvider>,
    request: PrayerRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning prayer generation (tone: {})", request.tone.label());
    tokio::spawn(async move {
        let action = match generate_prayer(provider.as_ref(), &request).await {
            Ok(text) => Action::PrayerGenerated(text),
            Err(e) => Action::PrayerFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send generation result: receiver dropped");
        }
    });
}

/// Hand the music URL to the desktop's default opener.
fn open_url(url: &str) {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    let result = command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match result {
        Ok(_) => info!("Opened {}", url),
        Err(e) => warn!("Failed to open {}: {}", url, e),
    }
}
