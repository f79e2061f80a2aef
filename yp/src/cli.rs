//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// yogaplan - personalized yoga routines from your profile
#[derive(Parser)]
#[command(
    name = "yp",
    about = "Generate a personalized yoga plan from your profile and preferences",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fill in the profile form and generate a plan (default)
    Plan {
        /// Read the profile from a YAML file instead of the form
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Where to write the plain-text plan
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write the plain-text plan
        #[arg(long, conflicts_with = "output")]
        no_export: bool,
    },

    /// Show the profile text sent to the model and the pose count it implies
    Profile {
        /// Read the profile from a YAML file instead of the form
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Show the full system prompt for a profile
    Prompt {
        /// Read the profile from a YAML file instead of the form
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Extract and display a plan from a saved model response
    Render {
        /// File holding the raw model response
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Also write the plain-text plan here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Output format for rendered plans
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Terminal layout with the pose grid
    #[default]
    Text,
    /// Markdown document
    Markdown,
    /// The five plan fields as JSON
    Json,
    /// The plain-text export document
    Export,
}
