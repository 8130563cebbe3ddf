//! Command handlers. Each translates arguments into core calls and prints
//! the result.

pub mod add;
pub mod completions;
pub mod config;
pub mod init;
pub mod plan;
pub mod templates;
