//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::DEFAULT_DATABASE;

/// Extract resume sections from a .docx or .pdf file into a SQLite database
#[derive(Parser, Debug)]
#[command(name = "resume-sections")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Resume document (.docx or .pdf)
    pub document: PathBuf,

    /// SQLite database to append the parsed sections to
    #[arg(env = "RESUME_DB", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output; errors are still printed
    #[arg(short, long)]
    pub quiet: bool,
}
