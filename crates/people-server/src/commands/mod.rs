//! Subcommand implementations.

pub mod add_secret;
pub mod serve;
