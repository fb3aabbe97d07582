use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sakinah")]
#[command(about = "Household worship, finance and family tracker toolkit")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "sakinah.toml", global = true)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute the Islamic maturity level of one person
    Classify {
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<String>,

        /// Role in the household (parent, child, ...)
        #[arg(long, default_value = "child")]
        role: String,

        /// Reference date instead of today, YYYY-MM-DD
        #[arg(long)]
        today: Option<String>,
    },

    /// Clean up the text of a quotes JSON file
    NormalizeQuotes {
        /// Quotes file to read
        input: PathBuf,

        /// Where to write the result (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create missing tables in the remote database
    PushSchema,

    /// Replace the quotes table with the configured quotes file
    SeedQuotes,

    /// Delete every quote from the remote database
    ClearQuotes,

    /// Push schema, then seed quotes
    InitDb,

    /// Copy logo assets into the sibling projects
    CopyLogos,

    /// Show footer statistics
    Stats {
        /// Count one page view before printing
        #[arg(long)]
        record_view: bool,
    },
}
