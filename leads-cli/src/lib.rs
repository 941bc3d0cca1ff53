//! Command-line front end for the lead kanban board
//!
//! The binary parses [`cli::Cli`], builds a [`context::CliContext`] from the
//! configuration and runs [`commands::execute`]. The pieces are exposed here so
//! commands can be driven in-process from tests.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod output;
