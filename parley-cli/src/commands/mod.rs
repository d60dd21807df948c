//! CLI command implementations.

pub mod assess;
pub mod config;
pub mod interview;
pub mod status;
