//! CLI library components for keyjoin.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
