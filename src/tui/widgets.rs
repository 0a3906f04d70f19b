//! Custom widgets for the TUI

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::commands::{PortfolioCommand, Section};
use super::theme::Theme;
use crate::config::Profile;

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Cut `text` so it fits in `max_width` columns, ending with `…` when cut.
pub fn truncate_to_width_str(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(1);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Wrap a long string into multiple lines, respecting unicode width
fn wrap_text(text: &str, max_width: usize, indent: &str) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let content_width = max_width.saturating_sub(indent.width());
    if content_width == 0 || text.width() <= content_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        let word_width = word.width();
        let sep = usize::from(!current_line.is_empty());
        if current_width + sep + word_width > content_width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }
        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }
        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient feedback line under the command bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub timestamp: String,
    shown_at: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Info)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Error)
    }

    fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= STATUS_TTL
    }
}

/// Prompt line with the current input
pub struct CommandBar<'a> {
    pub prompt: &'a str,
    pub content: &'a str,
    pub theme: Theme,
}

impl CommandBar<'_> {
    /// Column where the input text starts, relative to the bar's inner area.
    pub fn input_offset(prompt: &str) -> u16 {
        (prompt.width() + 1) as u16
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let hint = format!("[{}]", self.theme.mode().toggled());
        let mut spans = vec![
            Span::styled(self.prompt, self.theme.prompt()),
            Span::raw(" "),
        ];
        if self.content.is_empty() {
            spans.push(Span::styled(
                "Type a command... (try 'help')",
                self.theme.muted(),
            ));
        } else {
            spans.push(Span::styled(self.content, self.theme.text()));
        }

        let hint_width = hint.width() as u16;
        let line_width = inner.width.saturating_sub(hint_width + 1);
        buf.set_line(inner.x, inner.y, &Line::from(spans), line_width);
        if inner.width > hint_width {
            buf.set_span(
                inner.x + inner.width - hint_width,
                inner.y,
                &Span::styled(hint, self.theme.muted()),
                hint_width,
            );
        }
    }
}

/// Renders the current status message, if any
pub struct StatusLine<'a> {
    pub status: Option<&'a StatusMessage>,
    pub theme: Theme,
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(status) = self.status else {
            return;
        };
        let style = match status.kind {
            StatusKind::Info => self.theme.accent(),
            StatusKind::Error => self.theme.error(),
        };
        let line = Line::from(vec![
            Span::styled(format!("[{}] ", status.timestamp), self.theme.muted()),
            Span::styled(status.text.as_str(), style),
        ]);
        buf.set_line(area.x + 1, area.y, &line, area.width.saturating_sub(2));
    }
}

/// Dropdown of matching commands under the command bar
pub struct SuggestionList<'a> {
    pub matches: &'a [PortfolioCommand],
    pub selected: Option<usize>,
    pub theme: Theme,
}

impl SuggestionList<'_> {
    pub fn height(matches: usize) -> u16 {
        matches as u16 + 2
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .style(Style::default().bg(self.theme.mode().palette().background.into()));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, cmd) in self.matches.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let style = if self.selected == Some(i) {
                self.theme.selection()
            } else {
                self.theme.text()
            };
            let line = Line::from(vec![
                Span::styled(format!(" {:<10}", cmd.name()), style),
                Span::styled(format!(" {}", cmd.description()), self.theme.muted()),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

/// Text lines for a portfolio section.
pub fn section_lines(section: Section, profile: &Profile, width: usize) -> Vec<(String, SectionStyle)> {
    let mut lines = Vec::new();
    let push_wrapped = |lines: &mut Vec<(String, SectionStyle)>, text: &str, indent: &str, style: SectionStyle| {
        for row in wrap_text(text, width, indent) {
            lines.push((format!("{indent}{row}"), style));
        }
    };

    match section {
        Section::About => {
            lines.push((format!("{} | {}", profile.name, profile.role), SectionStyle::Heading));
            lines.push((String::new(), SectionStyle::Body));
            push_wrapped(&mut lines, &profile.about, "", SectionStyle::Body);
            if !profile.highlights.is_empty() {
                lines.push((String::new(), SectionStyle::Body));
                lines.push((profile.highlights.join(" · "), SectionStyle::Accent));
            }
        }
        Section::Projects => {
            for (i, project) in profile.projects.iter().enumerate() {
                if i > 0 {
                    lines.push((String::new(), SectionStyle::Body));
                }
                lines.push((format!("> {}", project.title), SectionStyle::Heading));
                push_wrapped(&mut lines, &project.description, "  ", SectionStyle::Body);
                if !project.technologies.is_empty() {
                    lines.push((format!("  [{}]", project.technologies.join(", ")), SectionStyle::Accent));
                }
                if let Some(url) = &project.url {
                    lines.push((format!("  {url}"), SectionStyle::Muted));
                }
            }
        }
        Section::Skills => {
            for category in &profile.skills {
                lines.push((format!("{}:", category.title), SectionStyle::Heading));
                push_wrapped(&mut lines, &category.skills.join(", "), "  ", SectionStyle::Body);
            }
        }
        Section::Timeline => {
            for (i, entry) in profile.timeline.iter().enumerate() {
                if i > 0 {
                    lines.push((String::new(), SectionStyle::Body));
                }
                lines.push((
                    format!("[{}] {}", entry.kind.label(), entry.title),
                    SectionStyle::Heading,
                ));
                let org = match (entry.organization.is_empty(), entry.period.is_empty()) {
                    (false, false) => format!("  {} ({})", entry.organization, entry.period),
                    (false, true) => format!("  {}", entry.organization),
                    (true, false) => format!("  {}", entry.period),
                    (true, true) => String::new(),
                };
                if !org.is_empty() {
                    lines.push((org, SectionStyle::Muted));
                }
                push_wrapped(&mut lines, &entry.description, "  ", SectionStyle::Body);
            }
        }
        Section::Contact => {
            lines.push((format!("email: {}", profile.email), SectionStyle::Body));
            for link in &profile.links {
                lines.push((format!("link:  {link}"), SectionStyle::Body));
            }
        }
    }

    if lines.is_empty() {
        lines.push(("Nothing here yet.".to_string(), SectionStyle::Muted));
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStyle {
    Heading,
    Body,
    Accent,
    Muted,
}

/// Window showing the active section
pub struct SectionPanel<'a> {
    pub section: Section,
    pub profile: &'a Profile,
    pub theme: Theme,
}

impl Widget for SectionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .style(Style::default().bg(theme.mode().palette().background.into()))
            .title_top(Line::styled(" portfolio.exe ", theme.muted()))
            .title_top(Line::styled(format!(" {} ", self.section.title()), theme.title()).right_aligned());
        let inner = block.inner(area);

        let lines: Vec<Line> = section_lines(self.section, self.profile, inner.width as usize)
            .into_iter()
            .map(|(text, style)| {
                let style = match style {
                    SectionStyle::Heading => theme.title(),
                    SectionStyle::Body => theme.text(),
                    SectionStyle::Accent => theme.accent(),
                    SectionStyle::Muted => theme.muted(),
                };
                Line::styled(text, style)
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Help bar showing key bindings
pub struct HelpBar {
    pub theme: Theme,
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bindings = [
            ("Enter", "Run"),
            ("Tab", "Complete"),
            ("↑↓", "History"),
            ("Esc", "Clear"),
            ("Ctrl+C", "Quit"),
        ];

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", self.theme.muted()));
            }
            spans.push(Span::styled(*key, self.theme.key()));
            spans.push(Span::styled(format!(" {}", desc), self.theme.key_desc()));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;
    use pretty_assertions::assert_eq;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width_str("projects", 20), "projects");
        assert_eq!(truncate_to_width_str("projects", 5), "proj…");
        assert_eq!(truncate_to_width_str("projects", 0), "");
    }

    #[test]
    fn test_wrap_text_on_words() {
        let lines = wrap_text("alpha beta gamma delta", 12, "");
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_status_expires_after_ttl() {
        let status = StatusMessage::info("Command history cleared");
        assert!(!status.is_expired(Instant::now()));
        assert!(status.is_expired(Instant::now() + STATUS_TTL));
    }

    #[test]
    fn test_command_bar_shows_prompt_and_theme_hint() {
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        CommandBar {
            prompt: "visitor@portfolio:~$",
            content: "about",
            theme: Theme::new(ThemeMode::Dark),
        }
        .render(area, &mut buf);
        let line = row(&buf, 1);
        assert!(line.contains("visitor@portfolio:~$ about"));
        assert!(line.contains("[light]"));
    }

    #[test]
    fn test_section_lines_timeline() {
        let profile = Profile::default();
        let lines = section_lines(Section::Timeline, &profile, 120);
        assert_eq!(lines[0].0, "[education] Master of Computer Science");
        assert_eq!(lines[1].0, "  Tech University (2020 - 2022)");
    }

    #[test]
    fn test_section_lines_empty_profile() {
        let profile = Profile {
            projects: Vec::new(),
            ..Profile::default()
        };
        let lines = section_lines(Section::Projects, &profile, 80);
        assert_eq!(lines, vec![("Nothing here yet.".to_string(), SectionStyle::Muted)]);
    }
}
