//! Asynchronous file reads feeding the session.
//!
//! Each request runs on its own reader thread and delivers its outcome over a
//! channel the event loop drains on every tick. There is no cancellation: a
//! read always runs to completion, and superseded outcomes are filtered by
//! the session's generation guard rather than aborted here.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use crate::domain::errors::LoadError;
use crate::domain::model::LoadedFile;

/// Completion notification for one read request.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Generation ticket issued by [`Session::begin_load`].
    ///
    /// [`Session::begin_load`]: crate::app::session::Session::begin_load
    pub generation: u64,
    pub result: Result<LoadedFile, LoadError>,
}

/// Spawns reader threads and collects their outcomes.
#[derive(Debug)]
pub struct FileLoader {
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Start reading `path` in the background. The outcome arrives later via
    /// [`poll`](Self::poll) tagged with `generation`.
    pub fn request(&self, path: PathBuf, generation: u64) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = read_file(&path);
            if let Err(err) = &result {
                tracing::warn!(error = %err, path = %path.display(), "file read failed");
            }
            // The receiver only disappears on shutdown; a failed send is fine.
            let _ = tx.send(LoadOutcome { generation, result });
        });
    }

    /// Drain any outcome that has completed since the last tick.
    pub fn poll(&self) -> Option<LoadOutcome> {
        self.rx.try_recv().ok()
    }
}

/// Read a file as text, decoding invalid UTF-8 lossily the way a browser's
/// `readAsText` would rather than refusing binary-ish content.
pub fn read_file(path: &Path) -> Result<LoadedFile, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = String::from_utf8_lossy(&bytes);
    let lossy = matches!(decoded, Cow::Owned(_));
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(LoadedFile {
        path: path.to_path_buf(),
        filename,
        content: decoded.into_owned(),
        lossy,
    })
}
