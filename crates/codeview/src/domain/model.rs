//! Domain models for loaded files.

use std::path::PathBuf;

/// A file that was read successfully and is ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// Full path the file was read from.
    pub path: PathBuf,
    /// Display name, the final path component.
    pub filename: String,
    /// Complete text content after UTF-8 decoding.
    pub content: String,
    /// True when decoding replaced invalid UTF-8 sequences.
    pub lossy: bool,
}
