//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar showing model name and status
//! - `VerseCard`: One themed section of verses
//! - `PrayerPanel`: The prayer generator form
//! - `MusicPlayer`: The floating background-music panel
//!
//! ### Stateful Components
//!
//! - `Reader`: Scrollable page composing the cards and the prayer panel,
//!   with its persistent `ReaderState` (scroll offset, cursor, hit-test layout)
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs     (Top status bar)
//! ├── text_wrap.rs     (Shared wrapping/width helpers)
//! ├── verse_card.rs    (Section card)
//! ├── prayer_panel.rs  (Prayer form)
//! ├── reader.rs        (Scrollable page)
//! └── music_player.rs  (Draggable overlay)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod music_player;
pub mod prayer_panel;
pub mod reader;
pub mod text_wrap;
pub mod verse_card;
pub use music_player::MusicPlayer;
pub use reader::{Reader, ReaderHit, ReaderState};
