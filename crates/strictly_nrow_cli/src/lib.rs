//! Terminal front end for strictly_nrow.
//!
//! The binary is a thin layer: clap parses the command, [`CliConfig`]
//! supplies play defaults, and the game itself runs in
//! [`strictly_nrow::GameSession`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod play;
pub mod query;

pub use cli::{Cli, Command};
pub use config::{CliConfig, ConfigError, ConfigErrorKind};
pub use play::{parse_board_choice, run_play};
pub use query::{run_rules, run_suggest, suggest, Suggestion};
