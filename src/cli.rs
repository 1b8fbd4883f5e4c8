use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lipisuggest")]
#[command(about = "lipisuggest - Prefix suggestions for Brahmic-script dictionaries.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Path to a static frontend directory served at /. If left empty, only the
    /// JSON APIs are available.
    #[arg(long)]
    pub site: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Print ranked suggestions for a prefix and exit.
    Suggest {
        /// Prefix to complete.
        prefix: String,

        /// Also print scores.
        #[arg(long)]
        scores: bool,
    },
}
