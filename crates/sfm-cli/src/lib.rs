//! SFM command-line interface library.
//!
//! Drives the field editors from a terminal: profiles select the backend,
//! each subcommand opens one modal session for a single field and prints
//! the resulting view.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod page;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use page::TerminalPage;
