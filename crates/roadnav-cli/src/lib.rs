//! roadnav CLI library.
//!
//! Subcommand handlers and output formatting for the `roadnav-cli` binary.

pub mod commands;
pub mod output;
