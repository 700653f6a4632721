//! Viewer component rendering loaded file content with a line-number gutter.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::session::Session;
use crate::infra::config::Defaults;

/// Scroll position and transient notices for the viewer pane.
#[derive(Debug, Default)]
pub struct ViewerState {
    scroll: usize,
    notice: Option<String>,
}

impl ViewerState {
    /// Reset for a freshly loaded file.
    pub fn reset(&mut self, notice: Option<String>) {
        self.scroll = 0;
        self.notice = notice;
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self, step: usize) {
        self.scroll = self.scroll.saturating_sub(step);
    }

    pub fn scroll_down(&mut self, step: usize, max: usize) {
        self.scroll = self.scroll.saturating_add(step).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to(&mut self, line: usize) {
        self.scroll = line;
    }
}

/// Ratatui component displaying the session's file with per-line numbering.
#[derive(Debug, Default)]
pub struct Viewer;

impl Viewer {
    pub fn render(
        &self,
        session: &Session,
        state: &ViewerState,
        defaults: &Defaults,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let title = format!("{} [{}]", session.filename(), session.language());

        let block = Block::default()
            .title(title)
            .title_bottom(
                Line::from(vec![
                    Span::styled("c", Style::default().fg(Color::Magenta)),
                    Span::raw(" clear · "),
                    Span::styled("o", Style::default().fg(Color::Magenta)),
                    Span::raw(" open another · "),
                    Span::styled("j/k", Style::default().fg(Color::Magenta)),
                    Span::raw(" scroll"),
                ])
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = content_lines(
            session.content(),
            defaults.line_numbers,
            defaults.tab_width,
        );

        if let Some(notice) = &state.notice {
            lines.insert(
                0,
                Line::styled(
                    notice.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        }

        let offset = state.scroll.min(u16::MAX as usize) as u16;
        let paragraph = Paragraph::new(lines).scroll((offset, 0));
        ratatui::widgets::Widget::render(paragraph, inner, buf);
    }
}

/// Number of rows the viewer shows for the given content: one per newline
/// separated segment, numbered from 1.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

/// Build the displayable lines for the content, optionally prefixed with the
/// gutter.
pub fn content_lines(content: &str, line_numbers: bool, tab_width: usize) -> Vec<Line<'static>> {
    content
        .split('\n')
        .enumerate()
        .map(|(idx, raw)| {
            let text = expand_tabs(raw.strip_suffix('\r').unwrap_or(raw), tab_width);
            if line_numbers {
                Line::from(vec![
                    Span::styled(format!("{:>4} │ ", idx + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(text),
                ])
            } else {
                Line::from(text)
            }
        })
        .collect()
}

fn expand_tabs(raw: &str, tab_width: usize) -> String {
    if raw.contains('\t') {
        raw.replace('\t', &" ".repeat(tab_width.max(1)))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_matches_newline_split() {
        assert_eq!(line_count("a\nb\nc"), 3);
        assert_eq!(line_count("a\nb\n"), 3);
        assert_eq!(line_count("single"), 1);
        assert_eq!(line_count(""), 1);
    }

    #[test]
    fn gutter_numbers_start_at_one() {
        let lines = content_lines("alpha\nbeta", true, 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "   1 │ ");
        assert_eq!(lines[1].spans[0].content, "   2 │ ");
        assert_eq!(lines[1].spans[1].content, "beta");
    }

    #[test]
    fn gutter_can_be_disabled() {
        let lines = content_lines("alpha\nbeta", false, 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(lines[0].spans[0].content, "alpha");
    }

    #[test]
    fn tabs_expand_and_crlf_is_stripped() {
        let lines = content_lines("\tindented\r\nnext", true, 2);
        assert_eq!(lines[0].spans[1].content, "  indented");
        assert_eq!(lines[1].spans[1].content, "next");
    }

    #[test]
    fn scroll_clamps_at_bounds() {
        let mut state = ViewerState::default();
        state.scroll_down(10, 5);
        assert_eq!(state.scroll(), 5);
        state.scroll_up(2);
        assert_eq!(state.scroll(), 3);
        state.scroll_up(100);
        assert_eq!(state.scroll(), 0);
    }
}
