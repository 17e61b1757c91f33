use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gitrecon")]
#[command(version, about = "GitHub reconnaissance: keyword search for users and repositories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search users by keyword and export enriched profiles
    Users {
        /// Comma-separated keyword terms
        #[arg(short, long)]
        keywords: String,

        /// Maximum records to collect (GitHub caps search at 1000)
        #[arg(short, long, default_value = "100")]
        max_results: usize,

        /// Output CSV file (".csv" appended if missing)
        #[arg(short, long, default_value = "usuarios_osint")]
        output: String,
    },

    /// Search repositories by keyword, ordered by stars
    Repos {
        /// Comma-separated keyword terms
        #[arg(short, long)]
        keywords: String,

        /// Maximum records to collect (GitHub caps search at 1000)
        #[arg(short, long, default_value = "100")]
        max_results: usize,

        /// Output CSV file (".csv" appended if missing)
        #[arg(short, long, default_value = "repositorios_osint")]
        output: String,
    },

    /// Capture and seal a fresh API token, replacing the stored one
    Token,
}
