//! Styles for the portfolio chrome, resolved per theme mode

use ratatui::style::{Color, Modifier, Style};

use crate::theme::{Rgb, ThemeMode};

/// Styles for one theme mode. Cheap to copy; rebuilt on every theme change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    mode: ThemeMode,
}

impl Theme {
    const DARK_ACCENT: Rgb = Rgb(0x4a, 0xde, 0x80);
    const LIGHT_ACCENT: Rgb = Rgb(0x15, 0x80, 0x3d);
    const DARK_MUTED: Rgb = Rgb(0x8a, 0x8a, 0x80);
    const LIGHT_MUTED: Rgb = Rgb(0x6b, 0x6b, 0x66);
    const ERROR: Color = Color::Red;

    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    fn accent_color(&self) -> Color {
        match self.mode {
            ThemeMode::Dark => Self::DARK_ACCENT.into(),
            ThemeMode::Light => Self::LIGHT_ACCENT.into(),
        }
    }

    fn muted_color(&self) -> Color {
        match self.mode {
            ThemeMode::Dark => Self::DARK_MUTED.into(),
            ThemeMode::Light => Self::LIGHT_MUTED.into(),
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.mode.palette().foreground.into())
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent_color())
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent_color())
    }

    pub fn prompt(&self) -> Style {
        self.title()
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_color())
    }

    pub fn error(&self) -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted_color())
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent_color())
    }

    /// Highlighted row in a list
    pub fn selection(&self) -> Style {
        let palette = self.mode.palette();
        Style::default()
            .bg(self.accent_color())
            .fg(palette.background.into())
            .add_modifier(Modifier::BOLD)
    }

    // Key hints
    pub fn key(&self) -> Style {
        self.title()
    }

    pub fn key_desc(&self) -> Style {
        self.muted()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
