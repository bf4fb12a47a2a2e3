//! CLI module
//!
//! Command-line interface for the catalog feed.
//!
//! # Commands
//!
//! - `browse` - Fetch the catalog and scroll through it page by page
//! - `fetch` - Fetch the catalog once and summarize it
//! - `config` - Show the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{BrowseReport, Runner};
