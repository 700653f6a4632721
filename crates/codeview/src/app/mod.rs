//! Application layer orchestrating domain logic and infrastructure.

pub mod loader;
pub mod session;
