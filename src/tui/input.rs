//! Input line editing for the command bar

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

use super::commands::CommandHistory;

/// Result of handling an input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No action needed
    None,
    /// Submit the current input (already trimmed, never blank)
    Submit(String),
    /// Quit the application
    Quit,
    /// Character input
    Input(char),
    Backspace,
    DeleteWord,
    ClearInput,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Up arrow
    HistoryPrev,
    /// Down arrow
    HistoryNext,
    Tab,
    Escape,
}

/// Input line state.
///
/// `cursor` is a CHARACTER index, not a byte index.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub buffer: String,
    pub cursor: usize,
    /// Position while browsing history; `None` means editing a fresh line.
    history_index: Option<usize>,
    /// Line being edited before history browsing started.
    draft: String,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.buffer.len())
    }

    fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
    }

    fn remove_char_before_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            if let Some((_, ch)) = self.buffer.char_indices().nth(self.cursor) {
                self.buffer.replace_range(byte_idx..byte_idx + ch.len_utf8(), "");
            }
        }
    }

    fn remove_char_at_cursor(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            if let Some((_, ch)) = self.buffer.char_indices().nth(self.cursor) {
                self.buffer.replace_range(byte_idx..byte_idx + ch.len_utf8(), "");
            }
        }
    }

    /// Handle a key event and return the action
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                InputAction::Quit
            }

            KeyCode::Enter => {
                let input = self.buffer.trim().to_string();
                if input.is_empty() {
                    return InputAction::None;
                }
                self.clear();
                InputAction::Submit(input)
            }

            KeyCode::Backspace => {
                self.remove_char_before_cursor();
                InputAction::Backspace
            }
            KeyCode::Delete => {
                self.remove_char_at_cursor();
                InputAction::Backspace
            }

            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
                InputAction::ClearInput
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word();
                InputAction::DeleteWord
            }

            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputAction::CursorLeft
            }
            KeyCode::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                InputAction::CursorRight
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputAction::CursorHome
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputAction::CursorHome
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                InputAction::CursorEnd
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                InputAction::CursorEnd
            }

            KeyCode::Up => InputAction::HistoryPrev,
            KeyCode::Down => InputAction::HistoryNext,
            KeyCode::Tab => InputAction::Tab,
            KeyCode::Esc => InputAction::Escape,

            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                InputAction::Input(c)
            }

            _ => InputAction::None,
        }
    }

    /// Replace buffer content (completion, history recall)
    pub fn set_buffer(&mut self, content: &str) {
        self.buffer = content.to_string();
        self.cursor = self.char_count();
    }

    /// Empty the line and stop browsing history.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.reset_browse();
    }

    pub fn reset_browse(&mut self) {
        self.history_index = None;
        self.draft.clear();
    }

    pub fn is_browsing_history(&self) -> bool {
        self.history_index.is_some()
    }

    fn delete_word(&mut self) {
        let chars: Vec<char> = self.buffer.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != ' ' {
            start -= 1;
        }
        while self.cursor > start {
            self.remove_char_before_cursor();
        }
    }

    /// Step to the next older history entry, saving the draft on first use.
    pub fn history_prev(&mut self, history: &CommandHistory) {
        let next = match self.history_index {
            None => 0,
            Some(i) => i + 1,
        };
        let Some(entry) = history.get(next) else {
            return;
        };
        if self.history_index.is_none() {
            self.draft = self.buffer.clone();
        }
        self.history_index = Some(next);
        self.set_buffer(entry);
    }

    /// Step to the next newer entry; past the newest, restore the draft.
    pub fn history_next(&mut self, history: &CommandHistory) {
        match self.history_index {
            Some(0) => {
                self.history_index = None;
                let draft = std::mem::take(&mut self.draft);
                self.set_buffer(&draft);
            }
            Some(i) => {
                if let Some(entry) = history.get(i - 1) {
                    self.history_index = Some(i - 1);
                    self.set_buffer(entry);
                }
            }
            None => {}
        }
    }

    /// Cursor position in terminal columns (wide characters take two)
    pub fn cursor_display_width(&self) -> usize {
        self.buffer
            .chars()
            .take(self.cursor)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(1))
            .sum()
    }
}
