use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tvindex")]
#[command(author, version, about = "Look up TV shows, seasons and episodes on TheTVDB")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Two-letter language code (overrides the config file)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Place episodes by DVD numbering instead of broadcast numbering
    #[arg(long, global = true)]
    pub dvd_order: bool,

    /// Fetch the artwork index
    #[arg(long, global = true)]
    pub banners: bool,

    /// Fetch the cast list
    #[arg(long, global = true)]
    pub actors: bool,

    /// Treat the series key as a numeric id instead of a name
    #[arg(long, global = true)]
    pub id: bool,

    /// Connect even right after a transport timeout
    #[arg(long, global = true)]
    pub force_connect: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a series and its seasons
    Show {
        /// Series name (or id with --id)
        key: String,

        /// Print the raw series fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one episode
    Episode {
        /// Series name (or id with --id)
        key: String,

        season: u32,

        episode: u32,

        /// Print only this field
        #[arg(long)]
        field: Option<String>,
    },

    /// Search a series' episodes for a term
    Search {
        /// Series name (or id with --id)
        key: String,

        term: String,

        /// Restrict matching to this field
        #[arg(long)]
        field: Option<String>,
    },

    /// List episodes that aired on a date
    Aired {
        /// Series name (or id with --id)
        key: String,

        /// Air date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
