//! Path prompt overlay standing in for the browser file picker.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Interactive state backing the path prompt overlay.
#[derive(Debug, Default, Clone)]
pub struct PathPromptState {
    visible: bool,
    input: String,
    message: Option<PromptMessage>,
}

impl PathPromptState {
    /// Reveal the prompt with an empty input buffer.
    pub fn open(&mut self) {
        self.visible = true;
        self.input.clear();
    }

    /// Hide the prompt.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the prompt is currently displayed.
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Access the current input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Consume the current input, leaving the buffer empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Append a character to the buffer.
    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Append a pasted chunk of text to the buffer.
    pub fn push_str(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Remove the most recently appended character if present.
    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Record a status message to display beneath the input field.
    pub fn set_message<S: Into<String>>(&mut self, level: PromptMessageLevel, message: S) {
        self.message = Some(PromptMessage::new(level, message.into()));
    }

    /// Retain only messages that have not expired.
    pub fn purge_expired_messages(&mut self) {
        if let Some(message) = &self.message
            && message.is_expired()
        {
            self.message = None;
        }
    }
}

/// Visual component that renders the path prompt overlay.
#[derive(Debug, Default)]
pub struct PathPrompt;

impl PathPrompt {
    /// Draw the prompt if it is visible.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &PathPromptState) {
        if !state.is_open() {
            return;
        }

        let width = area.width.saturating_sub(10).min(80);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(6),
            width,
            height: 5,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title("Open File")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        frame.render_widget(block.clone(), popup);

        let inner = block.inner(popup);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let prompt = Paragraph::new(format!("> {}", state.input()))
            .style(Style::default().fg(Color::White))
            .block(Block::default());
        frame.render_widget(prompt, layout[0]);

        if let Some(message) = &state.message {
            let style = match message.level {
                PromptMessageLevel::Info => Style::default().fg(Color::Gray),
                PromptMessageLevel::Error => {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                }
            };
            let paragraph = Paragraph::new(Line::from(message.text.clone()))
                .wrap(Wrap { trim: true })
                .style(style);
            frame.render_widget(paragraph, layout[1]);
        }
    }
}

/// Prompt message severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMessageLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct PromptMessage {
    level: PromptMessageLevel,
    text: String,
    expires_at: Instant,
}

impl PromptMessage {
    fn new(level: PromptMessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + Duration::from_secs(4),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_clears_previous_input() {
        let mut state = PathPromptState::default();
        state.push_char('a');
        state.open();
        assert!(state.is_open());
        assert_eq!(state.input(), "");
    }

    #[test]
    fn take_input_drains_the_buffer() {
        let mut state = PathPromptState::default();
        state.open();
        state.push_str("src/ma");
        state.push_char('i');
        state.push_char('n');
        state.pop_char();
        assert_eq!(state.take_input(), "src/mai");
        assert_eq!(state.input(), "");
    }
}
