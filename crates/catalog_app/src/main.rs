mod platform;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use platform::forms::{BookArgs, ReaderArgs};
use platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Library catalog client")]
struct Cli {
    /// RON configuration file; defaults are used when it does not exist.
    #[arg(long, default_value = "catalog.ron")]
    config: PathBuf,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Browse and search the catalog interactively (default).
    Browse {
        /// Address the page is opened at, e.g. "/public_catalog?page=2&query=вазов".
        #[arg(long)]
        location: Option<String>,
    },
    /// Register a new book.
    AddBook(BookArgs),
    /// Register a new reader.
    AddReader(ReaderArgs),
    /// Filter a saved table of borrowed books.
    Returns {
        #[arg(long)]
        rows: PathBuf,
        #[arg(default_value = "")]
        query: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log, cli.verbose);
    let config = platform::config::load_config(&cli.config);

    match cli.command.unwrap_or(CliCommand::Browse { location: None }) {
        CliCommand::Browse { location } => platform::app::run_browse(&config, location),
        CliCommand::AddBook(args) => platform::forms::run_add_book(&config, &args),
        CliCommand::AddReader(args) => platform::forms::run_add_reader(&config, &args),
        CliCommand::Returns { rows, query } => platform::returns::run_returns(&rows, &query),
    }
}
