//! Main TUI application

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::TermfolioConfig;
use crate::rain::{RainLayer, Viewport};
use crate::theme::ThemeMode;

use super::canvas::{RainBackground, TerminalCanvas, TERMINAL_CELL_SIZE};
use super::commands::{parse_command, CommandHistory, ParsedCommand, PortfolioCommand, Section, SuggestionPopup};
use super::input::{InputAction, InputState};
use super::picker::HistoryPicker;
use super::scheduler::FrameScheduler;
use super::theme::Theme;
use super::widgets::{CommandBar, HelpBar, SectionPanel, StatusLine, StatusMessage, SuggestionList};

/// How often the event loop drains input, offers a frame to the rain layer
/// and redraws (~60 Hz).
const DISPLAY_INTERVAL: Duration = Duration::from_millis(16);

/// Everything the UI shows, without the terminal.
pub struct AppState {
    pub config: TermfolioConfig,
    pub theme: ThemeMode,
    pub input: InputState,
    pub history: CommandHistory,
    pub suggestions: SuggestionPopup,
    pub picker: HistoryPicker,
    pub status: Option<StatusMessage>,
    pub section: Section,
    pub scheduler: FrameScheduler,
    pub rain: RainLayer<TerminalCanvas>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: TermfolioConfig, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, StdRng::from_os_rng())
    }

    pub fn with_rng(config: TermfolioConfig, viewport: Viewport, rng: StdRng) -> Self {
        let mut scheduler = FrameScheduler::new(viewport);
        let theme = config.theme;
        let surface = if config.rain.enabled {
            Some(TerminalCanvas::acquire(viewport))
        } else {
            debug!("Rain disabled by configuration");
            None
        };
        let options = config.rain.options().with_cell_size(TERMINAL_CELL_SIZE);
        let rain = RainLayer::mount(&mut scheduler, surface, theme, options, rng);

        Self {
            config,
            theme,
            input: InputState::new(),
            history: CommandHistory::new(),
            suggestions: SuggestionPopup::new(),
            picker: HistoryPicker::new(),
            status: None,
            section: Section::default(),
            scheduler,
            rain,
            should_quit: false,
        }
    }

    /// Display tick: deliver the pending frame and expire the status line.
    pub fn tick(&mut self, now: Instant) {
        if let Some(handle) = self.scheduler.take_frame() {
            let host_time = self.scheduler.now();
            self.rain.on_frame(&mut self.scheduler, handle, host_time);
        }
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let viewport = Viewport::new(u32::from(width), u32::from(height));
        self.scheduler.set_viewport(viewport);
        if self.scheduler.has_resize_listeners() {
            self.rain.on_resize(viewport);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.picker.visible {
            self.handle_picker_key(key);
            return;
        }

        match self.input.handle_key(key) {
            InputAction::Quit => self.should_quit = true,
            InputAction::Submit(line) => {
                let command = match self.suggestions.selected_command() {
                    Some(cmd) if self.suggestions.is_open() => cmd.name().to_string(),
                    _ => line,
                };
                self.suggestions.close();
                self.execute(&command);
            }
            InputAction::Input(_)
            | InputAction::Backspace
            | InputAction::DeleteWord
            | InputAction::ClearInput => {
                self.input.reset_browse();
                self.suggestions.update(&self.input.buffer);
            }
            InputAction::HistoryPrev => {
                if self.suggestions.is_open() {
                    self.suggestions.select_prev();
                } else {
                    self.input.history_prev(&self.history);
                }
            }
            InputAction::HistoryNext => {
                if self.suggestions.is_open() {
                    self.suggestions.select_next();
                } else {
                    self.input.history_next(&self.history);
                }
            }
            InputAction::Tab => {
                if let Some(cmd) = self.suggestions.selected_command() {
                    self.input.set_buffer(cmd.name());
                    self.suggestions.close();
                }
            }
            InputAction::Escape => {
                self.input.clear();
                self.suggestions.close();
                self.status = None;
            }
            InputAction::None
            | InputAction::CursorLeft
            | InputAction::CursorRight
            | InputAction::CursorHome
            | InputAction::CursorEnd => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Up => self.picker.select_prev(),
            KeyCode::Down => self.picker.select_next(),
            KeyCode::Enter => {
                if let Some(entry) = self.picker.selected_item() {
                    let entry = entry.to_string();
                    self.input.clear();
                    self.input.set_buffer(&entry);
                }
                self.picker.close();
            }
            KeyCode::Esc => self.picker.close(),
            _ => {}
        }
    }

    /// Run one submitted command line.
    pub fn execute(&mut self, line: &str) {
        let Some(parsed) = parse_command(line) else {
            return;
        };

        let cmd = match parsed {
            ParsedCommand::Unknown(raw) => {
                debug!(command = %raw, "Unknown command");
                self.status = Some(StatusMessage::error(format!(
                    "Command not found: {raw}. Type 'help' for available commands."
                )));
                return;
            }
            ParsedCommand::Known(cmd) => cmd,
        };

        info!(command = %cmd, "Running command");
        match cmd {
            PortfolioCommand::History => self.picker.open(&self.history),
            PortfolioCommand::Clear => {
                self.history.clear();
                self.status = Some(StatusMessage::info("Command history cleared"));
            }
            PortfolioCommand::Help => {
                self.status = Some(StatusMessage::info(PortfolioCommand::help_text()));
            }
            PortfolioCommand::Quit => self.should_quit = true,
            PortfolioCommand::Theme => {
                self.toggle_theme();
                self.history.record(line);
                self.status = Some(StatusMessage::info(format!(
                    "Theme switched to {} mode",
                    self.theme
                )));
            }
            PortfolioCommand::About
            | PortfolioCommand::Projects
            | PortfolioCommand::Skills
            | PortfolioCommand::Timeline
            | PortfolioCommand::Contact => {
                self.history.record(line);
                if let Some(section) = cmd.section() {
                    self.section = section;
                }
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.rain.set_theme(&mut self.scheduler, theme);
    }

    /// Stop the rain before the terminal goes away.
    pub fn shutdown(&mut self) {
        self.rain.unmount(&mut self.scheduler);
    }
}

/// Main TUI application
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
}

impl App {
    pub fn new(config: TermfolioConfig) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let size = terminal.size()?;
        let viewport = Viewport::new(u32::from(size.width), u32::from(size.height));
        let state = AppState::new(config, viewport);

        Ok(Self { terminal, state })
    }

    pub async fn run(&mut self) -> io::Result<()> {
        info!(theme = %self.state.theme, rain = self.state.rain.is_active(), "Portfolio started");

        let result = self.event_loop().await;

        self.state.shutdown();
        info!("Portfolio closed");
        result
    }

    async fn event_loop(&mut self) -> io::Result<()> {
        let mut ticker = time::interval(DISPLAY_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.state.should_quit {
            ticker.tick().await;

            // Drain pending input without blocking
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.state.handle_key(key);
                    }
                    Event::Resize(width, height) => self.state.resize(width, height),
                    _ => {}
                }
                if self.state.should_quit {
                    return Ok(());
                }
            }

            self.state.tick(Instant::now());
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let state = &self.state;
        let theme = Theme::new(state.theme);
        let palette = state.theme.palette();
        let canvas = state.rain.surface();
        let prompt = state.config.prompt.as_str();
        let profile = &state.config.profile;
        let section = state.section;
        let input = &state.input;
        let suggestions = &state.suggestions;
        let picker = &state.picker;
        let status = state.status.as_ref();

        self.terminal.draw(|f| {
            let size = f.area();
            f.render_widget(RainBackground { canvas, palette }, size);

            let content = centered_column(size, 96);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Margin
                    Constraint::Length(3), // Command bar
                    Constraint::Length(1), // Status
                    Constraint::Min(5),    // Section panel
                    Constraint::Length(1), // Help
                ])
                .split(content);

            f.render_widget(
                CommandBar {
                    prompt,
                    content: &input.buffer,
                    theme,
                },
                chunks[1],
            );
            f.render_widget(StatusLine { status, theme }, chunks[2]);
            f.render_widget(
                SectionPanel {
                    section,
                    profile,
                    theme,
                },
                chunks[3],
            );
            f.render_widget(HelpBar { theme }, chunks[4]);

            if suggestions.is_open() {
                let bar = chunks[1];
                let height = SuggestionList::height(suggestions.matches.len())
                    .min(size.height.saturating_sub(bar.bottom()));
                let area = Rect::new(bar.x + 1, bar.bottom(), 48.min(bar.width.saturating_sub(2)), height);
                f.render_widget(
                    SuggestionList {
                        matches: &suggestions.matches,
                        selected: suggestions.selected,
                        theme,
                    },
                    area,
                );
            }

            if picker.visible {
                picker.render(size, f.buffer_mut(), theme);
            } else {
                let bar = chunks[1];
                let offset = CommandBar::input_offset(prompt) + input.cursor_display_width() as u16;
                let x = (bar.x + 1 + offset).min(bar.right().saturating_sub(2));
                f.set_cursor_position((x, bar.y + 1));
            }
        })?;
        Ok(())
    }
}

/// A column `max_width` wide (or the whole width), centered in `area`.
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

impl Drop for App {
    fn drop(&mut self) {
        self.state.shutdown();
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::with_rng(
            TermfolioConfig::default(),
            Viewport::new(80, 24),
            StdRng::seed_from_u64(3),
        )
    }

    fn press(state: &mut AppState, code: KeyCode) {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn submit(state: &mut AppState, line: &str) {
        for c in line.chars() {
            press(state, KeyCode::Char(c));
        }
        press(state, KeyCode::Enter);
    }

    fn status_text(state: &AppState) -> Option<&str> {
        state.status.as_ref().map(|s| s.text.as_str())
    }

    #[test]
    fn test_section_command_switches_panel_and_records() {
        let mut state = state();
        submit(&mut state, "Skills");
        assert_eq!(state.section, Section::Skills);
        assert_eq!(state.history.entries(), &["Skills"]);
        assert!(state.input.buffer.is_empty());
    }

    #[test]
    fn test_unknown_command_is_not_recorded() {
        let mut state = state();
        submit(&mut state, "sudo");
        assert_eq!(
            status_text(&state),
            Some("Command not found: sudo. Type 'help' for available commands.")
        );
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_theme_command_toggles_and_recolors_rain() {
        let mut state = state();
        assert_eq!(state.theme, ThemeMode::Dark);
        submit(&mut state, "theme");

        assert_eq!(state.theme, ThemeMode::Light);
        assert_eq!(status_text(&state), Some("Theme switched to light mode"));
        assert_eq!(state.history.entries(), &["theme"]);
        assert_eq!(state.rain.theme(), ThemeMode::Light);
        let glyphs = state.rain.glyphs().unwrap();
        assert!(glyphs
            .iter()
            .all(|g| g.color == ThemeMode::Light.palette().foreground));
    }

    #[test]
    fn test_help_and_clear() {
        let mut state = state();
        submit(&mut state, "about");
        submit(&mut state, "help");
        assert_eq!(
            status_text(&state).map(|s| s.starts_with("Available commands: about")),
            Some(true)
        );
        assert_eq!(state.history.len(), 1);

        submit(&mut state, "clear");
        assert_eq!(status_text(&state), Some("Command history cleared"));
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_history_picker_recalls_entry() {
        let mut state = state();
        submit(&mut state, "about");
        submit(&mut state, "contact");
        submit(&mut state, "history");
        assert!(state.picker.visible);

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        assert!(!state.picker.visible);
        assert_eq!(state.input.buffer, "about");
        // not executed yet
        assert_eq!(state.section, Section::Contact);
    }

    #[test]
    fn test_history_picker_escape_closes() {
        let mut state = state();
        submit(&mut state, "history");
        assert!(state.picker.visible);
        press(&mut state, KeyCode::Esc);
        assert!(!state.picker.visible);
        assert!(state.input.buffer.is_empty());
    }

    #[test]
    fn test_arrows_browse_history_without_suggestions() {
        let mut state = state();
        submit(&mut state, "about");
        submit(&mut state, "skills");
        press(&mut state, KeyCode::Up);
        assert_eq!(state.input.buffer, "skills");
        press(&mut state, KeyCode::Up);
        assert_eq!(state.input.buffer, "about");
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.input.buffer, "");
    }

    #[test]
    fn test_suggestion_selection_runs_on_enter() {
        let mut state = state();
        for c in "ro".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        assert!(state.suggestions.is_open());
        assert_eq!(state.suggestions.matches, vec![PortfolioCommand::Projects]);

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.section, Section::Projects);
        assert_eq!(state.history.entries(), &["projects"]);
        assert!(!state.suggestions.is_open());
    }

    #[test]
    fn test_tab_completes_selected_suggestion() {
        let mut state = state();
        press(&mut state, KeyCode::Char('k'));
        // skills
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.input.buffer, "k");
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.input.buffer, "skills");
        assert!(!state.suggestions.is_open());
    }

    #[test]
    fn test_escape_clears_input_status_and_suggestions() {
        let mut state = state();
        submit(&mut state, "nope");
        press(&mut state, KeyCode::Char('a'));
        assert!(state.suggestions.is_open());
        press(&mut state, KeyCode::Esc);
        assert!(state.input.buffer.is_empty());
        assert!(state.status.is_none());
        assert!(!state.suggestions.is_open());
    }

    #[test]
    fn test_status_expires_on_tick() {
        let mut state = state();
        submit(&mut state, "help");
        state.tick(Instant::now());
        assert!(state.status.is_some());
        state.tick(Instant::now() + Duration::from_secs(4));
        assert!(state.status.is_none());
    }

    #[test]
    fn test_quit_command() {
        let mut state = state();
        submit(&mut state, "quit");
        assert!(state.should_quit);
    }

    #[test]
    fn test_rain_mounted_on_terminal_cells() {
        let state = state();
        assert!(state.rain.is_active());
        assert_eq!(state.rain.columns().map(|c| c.len()), Some(80));
        assert!(state.scheduler.has_pending_frame());
        assert_eq!(state.scheduler.listener_count(), 1);
    }

    #[test]
    fn test_rain_disabled_registers_nothing() {
        let state = AppState::with_rng(
            TermfolioConfig::default().with_rain_enabled(false),
            Viewport::new(80, 24),
            StdRng::seed_from_u64(3),
        );
        assert!(!state.rain.is_active());
        assert!(!state.scheduler.has_pending_frame());
        assert!(!state.scheduler.has_resize_listeners());
    }

    #[test]
    fn test_resize_rebuilds_columns() {
        let mut state = state();
        state.resize(120, 40);
        assert_eq!(state.rain.columns().map(|c| c.len()), Some(120));
        assert_eq!(state.rain.surface().map(|s| s.height()), Some(40));
    }

    #[test]
    fn test_rain_starts_after_zero_size_terminal_grows() {
        let mut state = AppState::with_rng(
            TermfolioConfig::default(),
            Viewport::new(0, 0),
            StdRng::seed_from_u64(1),
        );
        assert!(state.rain.is_active());
        assert_eq!(state.rain.columns().map(|c| c.len()), Some(0));
        assert!(state.scheduler.has_resize_listeners());

        state.resize(80, 24);
        assert_eq!(state.rain.columns().map(|c| c.len()), Some(80));
        assert_eq!(state.rain.surface().map(|s| (s.width(), s.height())), Some((80, 24)));
    }

    #[test]
    fn test_tick_keeps_one_frame_outstanding() {
        let mut state = state();
        for _ in 0..5 {
            state.tick(Instant::now());
            assert!(state.scheduler.has_pending_frame());
        }
        state.shutdown();
        assert!(!state.scheduler.has_pending_frame());
        assert!(!state.scheduler.has_resize_listeners());
    }
}
