//! Command bar vocabulary, suggestions and history.

use std::fmt;

/// Most recent commands kept in history.
pub const MAX_HISTORY: usize = 50;

/// Portfolio sections the panel can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    About,
    Projects,
    Skills,
    Timeline,
    Contact,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Timeline => "Education & Experience",
            Section::Contact => "Contact",
        }
    }
}

/// Commands understood by the command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioCommand {
    About,
    Projects,
    Skills,
    Timeline,
    Contact,
    Help,
    Theme,
    /// Show command history
    History,
    /// Clear command history
    Clear,
    Quit,
}

impl PortfolioCommand {
    /// Commands offered as suggestions while typing.
    pub fn suggestable() -> &'static [PortfolioCommand] {
        &[
            PortfolioCommand::About,
            PortfolioCommand::Projects,
            PortfolioCommand::Skills,
            PortfolioCommand::Timeline,
            PortfolioCommand::Contact,
            PortfolioCommand::Help,
            PortfolioCommand::Theme,
        ]
    }

    /// Always available, never suggested.
    pub fn builtins() -> &'static [PortfolioCommand] {
        &[
            PortfolioCommand::History,
            PortfolioCommand::Clear,
            PortfolioCommand::Quit,
        ]
    }

    pub fn all() -> impl Iterator<Item = PortfolioCommand> {
        Self::suggestable()
            .iter()
            .chain(Self::builtins())
            .copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            PortfolioCommand::About => "about",
            PortfolioCommand::Projects => "projects",
            PortfolioCommand::Skills => "skills",
            PortfolioCommand::Timeline => "timeline",
            PortfolioCommand::Contact => "contact",
            PortfolioCommand::Help => "help",
            PortfolioCommand::Theme => "theme",
            PortfolioCommand::History => "history",
            PortfolioCommand::Clear => "clear",
            PortfolioCommand::Quit => "quit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PortfolioCommand::About => "who I am",
            PortfolioCommand::Projects => "things I have built",
            PortfolioCommand::Skills => "languages and tools",
            PortfolioCommand::Timeline => "education and experience",
            PortfolioCommand::Contact => "get in touch",
            PortfolioCommand::Help => "list available commands",
            PortfolioCommand::Theme => "switch between dark and light",
            PortfolioCommand::History => "show command history",
            PortfolioCommand::Clear => "clear command history",
            PortfolioCommand::Quit => "leave the portfolio",
        }
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            PortfolioCommand::About => Some(Section::About),
            PortfolioCommand::Projects => Some(Section::Projects),
            PortfolioCommand::Skills => Some(Section::Skills),
            PortfolioCommand::Timeline => Some(Section::Timeline),
            PortfolioCommand::Contact => Some(Section::Contact),
            _ => None,
        }
    }

    /// Exact, case-insensitive lookup.
    pub fn parse(name: &str) -> Option<PortfolioCommand> {
        let name = name.trim().to_lowercase();
        Self::all().find(|cmd| cmd.name() == name)
    }

    /// Suggestable commands whose name contains `fragment`, case-insensitively.
    pub fn matching(fragment: &str) -> Vec<PortfolioCommand> {
        let fragment = fragment.to_lowercase();
        Self::suggestable()
            .iter()
            .filter(|cmd| cmd.name().contains(&fragment))
            .copied()
            .collect()
    }

    /// Text shown by `help`.
    pub fn help_text() -> String {
        let names: Vec<&str> = Self::all().map(|cmd| cmd.name()).collect();
        format!("Available commands: {}", names.join(", "))
    }
}

impl fmt::Display for PortfolioCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed command-bar input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Known(PortfolioCommand),
    /// Unrecognised input, trimmed but with its original case.
    Unknown(String),
}

/// Parse submitted input. Blank input yields `None`.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Some(match PortfolioCommand::parse(input) {
        Some(cmd) => ParsedCommand::Known(cmd),
        None => ParsedCommand::Unknown(input.to_string()),
    })
}

/// Suggestion dropdown state.
#[derive(Debug, Clone, Default)]
pub struct SuggestionPopup {
    pub visible: bool,
    pub matches: Vec<PortfolioCommand>,
    /// `None` until the user moves into the list.
    pub selected: Option<usize>,
}

impl SuggestionPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh matches for the current input. Any selection is dropped.
    pub fn update(&mut self, input: &str) {
        self.matches = PortfolioCommand::matching(input);
        self.visible = !input.is_empty() && !self.matches.is_empty();
        self.selected = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.matches.clear();
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible && !self.matches.is_empty()
    }

    pub fn select_next(&mut self) {
        let total = self.matches.len();
        if total == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < total => i + 1,
            _ => 0,
        });
    }

    pub fn select_prev(&mut self) {
        let total = self.matches.len();
        if total == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => total - 1,
        });
    }

    pub fn selected_command(&self) -> Option<PortfolioCommand> {
        self.selected.and_then(|i| self.matches.get(i).copied())
    }
}

/// Submitted commands, newest first.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command. Blank input and repeats of the newest entry are
    /// skipped; returns whether the entry was added.
    pub fn record(&mut self, command: &str) -> bool {
        let command = command.trim();
        if command.is_empty() || self.entries.first().is_some_and(|e| e == command) {
            return false;
        }
        self.entries.insert(0, command.to_string());
        self.entries.truncate(MAX_HISTORY);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            parse_command("  PROJECTS "),
            Some(ParsedCommand::Known(PortfolioCommand::Projects))
        );
        assert_eq!(
            parse_command("History"),
            Some(ParsedCommand::Known(PortfolioCommand::History))
        );
    }

    #[test]
    fn test_parse_unknown_keeps_case() {
        assert_eq!(
            parse_command(" Sudo rm "),
            Some(ParsedCommand::Unknown("Sudo rm".to_string()))
        );
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn test_help_lists_builtins_last() {
        assert_eq!(
            PortfolioCommand::help_text(),
            "Available commands: about, projects, skills, timeline, contact, help, theme, history, clear, quit"
        );
    }

    #[test]
    fn test_matching_is_substring() {
        assert_eq!(
            PortfolioCommand::matching("T"),
            vec![
                PortfolioCommand::About,
                PortfolioCommand::Projects,
                PortfolioCommand::Timeline,
                PortfolioCommand::Contact,
                PortfolioCommand::Theme,
            ]
        );
        assert!(PortfolioCommand::matching("hist").is_empty());
    }

    #[test]
    fn test_popup_selection_wraps() {
        let mut popup = SuggestionPopup::new();
        popup.update("o");
        // about, projects, contact
        assert!(popup.is_open());
        assert_eq!(popup.selected_command(), None);

        popup.select_prev();
        assert_eq!(popup.selected_command(), Some(PortfolioCommand::Contact));
        popup.select_next();
        assert_eq!(popup.selected_command(), Some(PortfolioCommand::About));
        popup.select_next();
        popup.select_next();
        popup.select_next();
        assert_eq!(popup.selected_command(), Some(PortfolioCommand::About));
    }

    #[test]
    fn test_popup_hidden_for_empty_or_unmatched_input() {
        let mut popup = SuggestionPopup::new();
        popup.update("");
        assert!(!popup.is_open());
        popup.update("zzz");
        assert!(!popup.is_open());
    }

    #[test]
    fn test_history_newest_first_without_repeats() {
        let mut history = CommandHistory::new();
        assert!(history.record("about"));
        assert!(history.record("skills"));
        assert!(!history.record("skills"));
        assert!(!history.record("   "));
        assert!(history.record("about"));
        assert_eq!(history.entries(), &["about", "skills", "about"]);
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = CommandHistory::new();
        for i in 0..(MAX_HISTORY + 10) {
            history.record(&format!("cmd{i}"));
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.get(0), Some("cmd59"));
        assert_eq!(history.get(MAX_HISTORY - 1), Some("cmd10"));
    }
}
