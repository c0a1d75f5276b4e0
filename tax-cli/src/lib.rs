//! `taxbot`: command-line front end for the income-tax engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command, GlobalArgs, ProfileArgs};
pub use config::{CliConfig, Settings};
