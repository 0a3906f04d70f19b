//! Command history overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::commands::CommandHistory;
use super::theme::Theme;
use super::widgets::truncate_to_width_str;

const VISIBLE_ITEMS: usize = 8;

/// History picker state. Holds a snapshot of the history taken when opened.
#[derive(Debug, Clone, Default)]
pub struct HistoryPicker {
    pub visible: bool,
    pub items: Vec<String>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl HistoryPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, history: &CommandHistory) {
        self.visible = true;
        self.items = history.entries().to_vec();
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.items.clear();
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            if self.selected == 0 {
                self.selected = self.items.len() - 1;
            } else {
                self.selected -= 1;
            }
            self.ensure_visible();
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
            self.ensure_visible();
        }
    }

    fn ensure_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + VISIBLE_ITEMS {
            self.scroll_offset = self.selected + 1 - VISIBLE_ITEMS;
        }
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Render centered over `area`
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: Theme) {
        if !self.visible {
            return;
        }

        let width = (area.width / 2).clamp(32.min(area.width), 64.min(area.width));
        let height = (VISIBLE_ITEMS as u16 + 2).min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let picker_area = Rect::new(x, y, width, height);

        Clear.render(picker_area, buf);

        let inner_width = width.saturating_sub(2) as usize;
        let lines: Vec<Line> = if self.items.is_empty() {
            vec![Line::styled("No commands in history", theme.muted())]
        } else {
            self.items
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(VISIBLE_ITEMS)
                .map(|(i, item)| {
                    let is_selected = i == self.selected;
                    let prefix = if is_selected { "> " } else { "  " };
                    let style = if is_selected {
                        theme.selection()
                    } else {
                        theme.text()
                    };
                    let avail = inner_width.saturating_sub(prefix.width());
                    Line::from(vec![
                        Span::styled(prefix, style),
                        Span::styled(truncate_to_width_str(item, avail), style),
                    ])
                })
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_focused())
            .style(theme.text().bg(theme.mode().palette().background.into()))
            .title_top(Line::styled(" Command History ", theme.title()))
            .title_bottom(Line::styled(" Up/Down Enter Esc ", theme.muted()));

        Paragraph::new(lines).block(block).render(picker_area, buf);
    }
}
