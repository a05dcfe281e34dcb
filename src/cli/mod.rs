//! CLI module for rival
//!
//! Command-line parsing for the rival-server binary. Uses clap for argument
//! parsing and owo-colors for colored terminal output.

pub mod analyze;
pub mod config;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rival - competitor-analysis research pipeline
///
/// Searches the web for a topic, summarizes the hits into research notes,
/// indexes them for retrieval and drafts a structured report.
#[derive(Parser, Debug)]
#[command(
    name = "rival-server",
    version,
    about = "rival - competitor-analysis research pipeline",
    long_about = "Searches the web for a topic, summarizes the results with an LLM,\n\
                  indexes the notes in a vector store and drafts an executive report.\n\n\
                  Run without arguments to start the HTTP server, or use 'analyze' for a one-shot run.",
    after_help = "EXAMPLES:\n    \
                  rival-server                            # Start the server (rival.toml optional)\n    \
                  rival-server analyze \"Amazon\"           # Run the pipeline once and print the report\n    \
                  rival-server analyze \"Amazon\" --json    # Print the final state as JSON\n    \
                  rival-server config --validate          # Check configuration and API keys"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "rival.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (the default when no subcommand is given)
    Serve,

    /// Run the pipeline once for a topic and print the result
    Analyze {
        /// Topic to research, e.g. a company name
        topic: String,

        /// Print the final pipeline state as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Only validate the configuration and report warnings
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, defaulting to `serve`
    pub fn effective_command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
