//! # Music Player Overlay
//!
//! Visibility and drag state for the floating music panel.
//!
//! ```text
//!            pointer-down on title row
//!   Idle ─────────────────────────────────▶ Dragging { offset }
//!    ▲                                          │  pointer-move:
//!    │            pointer-up (anywhere)         │  pos = pointer - offset
//!    └──────────────────────────────────────────┘
//! ```
//!
//! Coordinates are terminal cells. The position is never clamped, so the
//! panel may sit partly or fully outside the viewport.

/// Overlay size in cells (including borders).
pub const OVERLAY_WIDTH: u16 = 50;
pub const OVERLAY_HEIGHT: u16 = 8;

/// Close control drawn at the right end of the title row.
pub const CLOSE_LABEL: &str = "[x]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayPosition {
    pub x: i32,
    pub y: i32,
}

impl OverlayPosition {
    /// Position that roughly centres the overlay in a `width`×`height` viewport.
    pub fn centered(width: u16, height: u16) -> Self {
        Self {
            x: (i32::from(width) - i32::from(OVERLAY_WIDTH)) / 2,
            y: (i32::from(height) - i32::from(OVERLAY_HEIGHT)) / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer offset from the overlay's top-left corner at pointer-down.
    Dragging { offset_x: i32, offset_y: i32 },
}

#[derive(Debug, Default)]
pub struct OverlayState {
    pub visible: bool,
    pub position: OverlayPosition,
    pub drag: DragState,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips visibility. Becoming visible always starts from the centred
    /// default; the previous position is not kept.
    pub fn toggle(&mut self, viewport: (u16, u16)) {
        if self.visible {
            self.close();
        } else {
            self.visible = true;
            self.position = OverlayPosition::centered(viewport.0, viewport.1);
            self.drag = DragState::Idle;
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.drag = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Whether the cell lies anywhere on the overlay.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        let (col, row) = (i32::from(col), i32::from(row));
        self.visible
            && col >= self.position.x
            && col < self.position.x + i32::from(OVERLAY_WIDTH)
            && row >= self.position.y
            && row < self.position.y + i32::from(OVERLAY_HEIGHT)
    }

    /// Whether the cell is on the drag handle (the title row).
    pub fn on_handle(&self, col: u16, row: u16) -> bool {
        self.contains(col, row) && i32::from(row) == self.position.y
    }

    /// Whether the cell is on the close control.
    pub fn on_close_control(&self, col: u16, row: u16) -> bool {
        let (start, end) = self.close_control_span();
        self.on_handle(col, row) && (start..end).contains(&i32::from(col))
    }

    /// Column range `[start, end)` occupied by the close label.
    pub fn close_control_span(&self) -> (i32, i32) {
        let end = self.position.x + i32::from(OVERLAY_WIDTH) - 1;
        (end - CLOSE_LABEL.len() as i32, end)
    }

    /// Pointer pressed. Starts a drag when it lands on the handle (but not
    /// on the close control). Returns whether a drag started.
    pub fn pointer_down(&mut self, col: u16, row: u16) -> bool {
        if !self.on_handle(col, row) || self.on_close_control(col, row) {
            return false;
        }
        self.drag = DragState::Dragging {
            offset_x: i32::from(col) - self.position.x,
            offset_y: i32::from(row) - self.position.y,
        };
        true
    }

    /// Pointer moved. Repositions the overlay while dragging.
    pub fn pointer_move(&mut self, col: u16, row: u16) -> bool {
        match self.drag {
            DragState::Dragging { offset_x, offset_y } => {
                self.position = OverlayPosition {
                    x: i32::from(col) - offset_x,
                    y: i32::from(row) - offset_y,
                };
                true
            }
            DragState::Idle => false,
        }
    }

    /// Pointer released anywhere in the terminal.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }
}
