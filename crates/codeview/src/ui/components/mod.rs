//! Collection of reusable TUI components.

pub mod drop_zone;
pub mod path_prompt;
pub mod viewer;
