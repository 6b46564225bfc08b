mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gencal")]
#[command(about = "Render a month of dated records as a calendar grid")]
struct Cli {
    /// Show debug logging (e.g. records left off the calendar)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one month of a records file (.json or .toml)
    Month {
        records: PathBuf,

        /// Year to show (defaults to this year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to this month)
        #[arg(short, long)]
        month: Option<u32>,

        /// First day of the week, 0 (Monday) to 6 (Sunday); overrides the config
        #[arg(long)]
        first_weekday: Option<u8>,

        /// Field holding each record's date
        #[arg(long, default_value = "date")]
        date_field: String,

        /// Field holding each record's label
        #[arg(long, default_value = "name")]
        label_field: String,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Month {
            records,
            year,
            month,
            first_weekday,
            date_field,
            label_field,
        } => commands::month::run(commands::month::MonthArgs {
            records,
            year,
            month,
            first_weekday,
            date_field,
            label_field,
        }),
        Commands::Config => commands::config::run(),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow::anyhow!("invalid RUST_LOG: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
