//! Drop-zone panel shown while no file is loaded.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::infra::config::Picker;

/// Empty-state component inviting the user to drop or pick a file.
#[derive(Debug, Default)]
pub struct DropZone;

impl DropZone {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, picker: &Picker, is_dragging: bool) {
        let (border_color, border_type) = if is_dragging {
            (Color::Magenta, BorderType::Thick)
        } else {
            (Color::DarkGray, BorderType::Rounded)
        };

        let block = Block::default()
            .title("codeview")
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::default(),
            Line::styled(
                "Drop your code file here",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::styled("or", Style::default().fg(Color::DarkGray)),
            Line::default(),
            Line::styled(
                "press o to enter a file path",
                Style::default().fg(Color::Magenta),
            ),
        ];

        if !picker.extensions.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("Supports: {}", summarize_extensions(picker)),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

fn summarize_extensions(picker: &Picker) -> String {
    const SHOWN: usize = 10;
    let mut shown: Vec<&str> = picker
        .extensions
        .iter()
        .take(SHOWN)
        .map(String::as_str)
        .collect();
    if picker.extensions.len() > SHOWN {
        shown.push("…");
    }
    shown.join(", ")
}
