use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse bank statement transactions, grouped by year, month and beneficiary.
#[derive(Parser, Debug)]
pub struct Args {
    /// YAML config file. Without it, built-in defaults are used.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a bank statement CSV file in the interactive tree view
    View {
        #[clap(long)]
        file: PathBuf,
    },

    /// Show all transactions in the database in the interactive tree view
    App {
        /// Database file, defaults to the one from the config
        #[clap(long)]
        db: Option<PathBuf>,
    },

    /// Print the aggregated transactions as a nested list
    List {
        #[clap(flatten)]
        source: Source,

        /// Also print every single transaction
        #[clap(long)]
        details: bool,
    },

    /// Manage the transaction database
    Db {
        #[clap(subcommand)]
        command: DbCommand,
    },
}

#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// Read transactions from a bank statement CSV file
    #[clap(long)]
    pub file: Option<PathBuf>,

    /// Read transactions from a database file
    #[clap(long)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Create a new, empty database file
    Init {
        #[clap(long)]
        db: Option<PathBuf>,
    },

    /// Import a bank statement CSV file into the database
    Load {
        #[clap(long)]
        file: PathBuf,

        #[clap(long)]
        db: Option<PathBuf>,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
