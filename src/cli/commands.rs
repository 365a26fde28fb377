use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `postcraft` - adaptive posting decisions and draft selection.
#[derive(Parser, Debug)]
#[command(name = "postcraft")]
#[command(version)]
#[command(about = "Decide when to post and what to post.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.postcraft/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one decision over a JSON signal snapshot
    Decide {
        /// Snapshot file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        snapshot: String,

        /// Seed for a reproducible decision
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Print only the attribution row (null when holding)
        #[arg(long)]
        attribution: bool,
    },

    /// List scored trend candidates and the topic that would be selected
    Rank {
        /// Snapshot file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        snapshot: String,
    },

    /// Score a piece of text with the quality gate
    Check {
        /// Text to score as a single post
        #[arg(short, long)]
        text: String,

        /// Snapshot supplying limits, style and recent posts
        #[arg(short, long)]
        snapshot: Option<String>,

        /// Run the single revision pass when the vibe score is low
        #[arg(long)]
        revise: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        config_command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the path of the loaded config file
    Path,
}
