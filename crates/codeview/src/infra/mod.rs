//! Infrastructure adapters for configuration and external integrations.

pub mod config;
