//! CLI library components for the wave catalog.

pub mod config;
pub mod logging;
