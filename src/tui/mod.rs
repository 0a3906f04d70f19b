//! Terminal User Interface module
//!
//! Hosts the rain layer behind a command bar and a single section panel.

mod app;
pub mod canvas;
pub mod commands;
mod input;
mod picker;
pub mod scheduler;
mod theme;
mod widgets;

pub use app::{App, AppState};
pub use canvas::{RainBackground, TerminalCanvas, TERMINAL_CELL_SIZE};
pub use commands::{parse_command, CommandHistory, ParsedCommand, PortfolioCommand, Section, SuggestionPopup};
pub use input::{InputAction, InputState};
pub use picker::HistoryPicker;
pub use scheduler::FrameScheduler;
pub use theme::Theme;
pub use widgets::{StatusKind, StatusMessage};
