//! The view's authoritative state for the currently loaded file.
//!
//! A session is either `Empty` (drop zone showing) or `Loaded` (viewer
//! showing). `content`, `filename`, and `language` are populated and cleared
//! together; there is no observable state where one is set and another is
//! not. The drag flag is independent of both states and only styles the drop
//! zone.

use crate::domain::language::classify;
use crate::domain::model::LoadedFile;

/// Coarse lifecycle of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
}

/// Mutable view state, mutated only through the named transitions below.
#[derive(Debug, Default, Clone)]
pub struct Session {
    content: String,
    filename: String,
    language: String,
    is_dragging: bool,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty content means "no file loaded"; loading a zero-byte file keeps
    /// the drop zone showing.
    pub fn state(&self) -> SessionState {
        if self.content.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Loaded
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Begin an asynchronous load, returning the generation ticket the
    /// eventual outcome must carry. Issuing a new ticket supersedes any read
    /// still in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a completed read. All three fields change in one step, so no
    /// render can observe a mix of old and new values. Returns `false` when
    /// the outcome is stale (a later `begin_load` superseded it) and was
    /// discarded.
    pub fn apply(&mut self, generation: u64, file: LoadedFile) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding superseded load"
            );
            return false;
        }
        self.language = classify(&file.filename);
        self.content = file.content;
        self.filename = file.filename;
        true
    }

    /// Reset to the empty state. The drag flag is driven solely by drag
    /// events and is left alone.
    pub fn clear(&mut self) {
        self.content.clear();
        self.filename.clear();
        self.language.clear();
    }

    pub fn drag_enter(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn loaded(name: &str, content: &str) -> LoadedFile {
        LoadedFile {
            path: PathBuf::from(name),
            filename: name.to_string(),
            content: content.to_string(),
            lossy: false,
        }
    }

    #[test]
    fn starts_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.content(), "");
        assert_eq!(session.filename(), "");
        assert_eq!(session.language(), "");
    }

    #[test]
    fn apply_populates_all_fields_together() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        assert!(session.apply(ticket, loaded("main.py", "print('hi')\n")));

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.content(), "print('hi')\n");
        assert_eq!(session.filename(), "main.py");
        assert_eq!(session.language(), "python");
    }

    #[test]
    fn clear_empties_all_fields() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        session.apply(ticket, loaded("lib.rs", "pub fn f() {}"));
        session.drag_enter();

        session.clear();

        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.content(), "");
        assert_eq!(session.filename(), "");
        assert_eq!(session.language(), "");
        // drag flag is orthogonal to the load state
        assert!(session.is_dragging());
    }

    #[test]
    fn reload_overwrites_previous_file() {
        let mut session = Session::new();
        let first = session.begin_load();
        session.apply(first, loaded("old.js", "let a = 1;"));

        let second = session.begin_load();
        session.apply(second, loaded("new.go", "package main"));

        assert_eq!(session.filename(), "new.go");
        assert_eq!(session.language(), "go");
        assert_eq!(session.content(), "package main");
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_load();
        let second = session.begin_load();

        assert!(!session.apply(first, loaded("slow.c", "int main;")));
        assert_eq!(session.state(), SessionState::Empty);

        assert!(session.apply(second, loaded("fast.c", "int main(void);")));
        assert_eq!(session.filename(), "fast.c");
    }

    #[test]
    fn zero_byte_file_keeps_the_drop_zone() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        assert!(session.apply(ticket, loaded("empty.md", "")));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn drag_events_never_touch_content() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        session.apply(ticket, loaded("view.html", "<html></html>"));

        session.drag_enter();
        assert!(session.is_dragging());
        assert_eq!(session.filename(), "view.html");

        session.drag_leave();
        assert!(!session.is_dragging());
        assert_eq!(session.content(), "<html></html>");
        assert_eq!(session.language(), "html");
    }
}
