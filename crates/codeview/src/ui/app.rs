//! Application loop for the TUI.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
    Event, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use crate::app::loader::{FileLoader, LoadOutcome};
use crate::app::session::{Session, SessionState};
use crate::infra::config::Config;
use crate::ui::components::drop_zone::DropZone;
use crate::ui::components::path_prompt::{PathPrompt, PathPromptState, PromptMessageLevel};
use crate::ui::components::viewer::{Viewer, ViewerState, line_count};

const TICK_RATE: Duration = Duration::from_millis(120);
const PAGE_STEP: usize = 20;

/// Primary entry point for running the interactive TUI.
pub struct UiApp {
    config: Config,
    session: Session,
    loader: FileLoader,
    viewer: Viewer,
    viewer_state: ViewerState,
    drop_zone: DropZone,
    prompt_state: PathPromptState,
    prompt: PathPrompt,
    status: Option<StatusMessage>,
    force_plain_gutter: bool,
    should_quit: bool,
}

impl Default for UiApp {
    fn default() -> Self {
        Self {
            config: Config::default(),
            session: Session::new(),
            loader: FileLoader::new(),
            viewer: Viewer,
            viewer_state: ViewerState::default(),
            drop_zone: DropZone,
            prompt_state: PathPromptState::default(),
            prompt: PathPrompt,
            status: None,
            force_plain_gutter: false,
            should_quit: false,
        }
    }
}

impl UiApp {
    /// Suppress the line-number gutter regardless of configuration.
    pub fn hide_line_numbers(&mut self) {
        self.force_plain_gutter = true;
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self, initial: Option<PathBuf>) -> Result<()> {
        self.bootstrap(initial)?;

        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableFocusChange
        )
        .context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            DisableFocusChange,
            LeaveAlternateScreen
        );
        let _ = terminal.show_cursor();

        event_loop_result
    }

    fn bootstrap(&mut self, initial: Option<PathBuf>) -> Result<()> {
        self.config = Config::load()?;
        if self.force_plain_gutter {
            self.config.defaults.line_numbers = false;
        }

        if let Some(path) = initial {
            self.load_path(path);
        }
        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(size);

        match self.session.state() {
            SessionState::Empty => {
                self.drop_zone.render(
                    frame,
                    layout[0],
                    &self.config.picker,
                    self.session.is_dragging(),
                );
            }
            SessionState::Loaded => {
                self.viewer.render(
                    &self.session,
                    &self.viewer_state,
                    &self.config.defaults,
                    layout[0],
                    frame.buffer_mut(),
                );
            }
        }

        self.render_status(frame, layout[1]);
        self.prompt.render(frame, size, &self.prompt_state);
    }

    fn render_status(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let message = self.status.as_ref().map(|status| {
            let style = match status.level {
                StatusLevel::Info => Style::default().fg(Color::Gray),
                StatusLevel::Success => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red),
            };
            Line::styled(status.text.clone(), style)
        });

        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let line = message.unwrap_or_else(|| {
            Line::styled(
                "Ready · o open · q quit",
                Style::default().fg(Color::DarkGray),
            )
        });
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn tick(&mut self) {
        while let Some(outcome) = self.loader.poll() {
            self.apply_outcome(outcome);
        }

        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
        self.prompt_state.purge_expired_messages();
    }

    fn apply_outcome(&mut self, outcome: LoadOutcome) {
        match outcome.result {
            Ok(file) => {
                let lossy = file.lossy;
                let bytes = file.content.len() as u64;
                if !self.session.apply(outcome.generation, file) {
                    return;
                }

                let notice = lossy
                    .then(|| "Content contained invalid UTF-8; shown with replacements".to_string());
                self.viewer_state.reset(notice);

                if bytes == 0 {
                    self.set_status(
                        StatusLevel::Info,
                        format!("{} is empty; nothing to show", self.session.filename()),
                    );
                } else if bytes > self.config.defaults.max_file_size {
                    self.set_status(
                        StatusLevel::Info,
                        format!("Loaded {} ({bytes} bytes, large file)", self.session.filename()),
                    );
                } else {
                    self.set_status(
                        StatusLevel::Success,
                        format!(
                            "Loaded {} · {}",
                            self.session.filename(),
                            self.session.language()
                        ),
                    );
                }
            }
            Err(err) => {
                // Failed reads never change the session; the prior view stays.
                self.set_status(StatusLevel::Error, err.to_string());
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Paste(text) => self.handle_paste(text),
            Event::FocusGained => {
                if self.session.state() == SessionState::Empty && !self.prompt_state.is_open() {
                    self.session.drag_enter();
                }
            }
            Event::FocusLost => {
                self.session.drag_leave();
            }
            Event::Resize(..) => {}
            Event::Mouse(_) => {}
        }
        Ok(())
    }

    /// Terminal drag-and-drop: dropping a file pastes its path. Only the
    /// drop zone accepts drops; the viewer ignores them, matching the UI
    /// where drag handlers detach once a file is loaded.
    fn handle_paste(&mut self, text: String) {
        if self.prompt_state.is_open() {
            self.prompt_state.push_str(text.trim_end_matches(['\r', '\n']));
            return;
        }

        if self.session.state() != SessionState::Empty {
            return;
        }

        self.session.drag_leave();
        if let Some(path) = dropped_path(&text) {
            self.load_path(path);
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return Ok(());
        }

        if self.prompt_state.is_open() {
            self.handle_prompt_key(key);
            return Ok(());
        }

        match self.session.state() {
            SessionState::Empty => self.handle_drop_zone_key(key),
            SessionState::Loaded => self.handle_viewer_key(key),
        }
        Ok(())
    }

    fn handle_drop_zone_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                self.prompt_state.open();
            }
            _ => {}
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) {
        let max = line_count(self.session.content()).saturating_sub(1);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('o') => {
                self.prompt_state.open();
            }
            KeyCode::Char('c') | KeyCode::Char('x') => {
                self.session.clear();
                self.viewer_state.reset(None);
                self.set_status(StatusLevel::Info, "Cleared");
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.viewer_state.scroll_down(1, max);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.viewer_state.scroll_up(1);
            }
            KeyCode::PageDown => {
                self.viewer_state.scroll_down(PAGE_STEP, max);
            }
            KeyCode::PageUp => {
                self.viewer_state.scroll_up(PAGE_STEP);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.viewer_state.scroll_to_top();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.viewer_state.scroll_to(max);
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.prompt_state.close();
            }
            KeyCode::Enter => {
                let input = self.prompt_state.take_input();
                let input = input.trim();
                // A dismissed or empty picker fires no transition.
                if input.is_empty() {
                    self.prompt_state.close();
                    return;
                }
                if !self.config.picker.advertises(input) {
                    // Advisory only, exactly like a picker filter.
                    self.prompt_state.set_message(
                        PromptMessageLevel::Info,
                        "Extension not in the supported list; loading anyway",
                    );
                }
                self.prompt_state.close();
                self.load_path(PathBuf::from(input));
            }
            KeyCode::Backspace => {
                self.prompt_state.pop_char();
            }
            KeyCode::Char(ch) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.prompt_state.push_char(ch);
                }
            }
            _ => {}
        }
    }

    fn load_path(&mut self, path: PathBuf) {
        let generation = self.session.begin_load();
        self.set_status(StatusLevel::Info, format!("Loading {}", path.display()));
        self.loader.request(path, generation);
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }
}

/// Extract a usable path from pasted drop text. Terminals commonly quote
/// paths containing spaces or prefix them with `file://`.
fn dropped_path(text: &str) -> Option<PathBuf> {
    let first = text.lines().next()?.trim();
    let unquoted = first
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .or_else(|| {
            first
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
        })
        .unwrap_or(first);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
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

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Info,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_path_unwraps_quotes_and_uri_prefix() {
        assert_eq!(
            dropped_path("'/tmp/my file.rs'"),
            Some(PathBuf::from("/tmp/my file.rs"))
        );
        assert_eq!(
            dropped_path("\"/tmp/other.py\"\n"),
            Some(PathBuf::from("/tmp/other.py"))
        );
        assert_eq!(
            dropped_path("file:///home/user/app.js"),
            Some(PathBuf::from("/home/user/app.js"))
        );
    }

    #[test]
    fn dropped_path_rejects_empty_drops() {
        assert_eq!(dropped_path(""), None);
        assert_eq!(dropped_path("\n"), None);
        assert_eq!(dropped_path("''"), None);
    }
}
