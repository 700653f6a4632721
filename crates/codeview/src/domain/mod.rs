//! Pure domain types and the language classifier.

pub mod errors;
pub mod language;
pub mod model;
