use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use extrato_ingest::{EntriesLayoutParser, ParsedStatement, StatementParser};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod state;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "extrato", version, about = "Parse extracted bank-statement text into a reconciled ledger")]
struct Cli {
    /// Trace dropped lines and parser decisions to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.extrato/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a text file (`-` for stdin) and print the statement
    Parse {
        file: PathBuf,

        /// Output format (defaults to the config file, then table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print balances and debit/credit totals
    Summary { file: PathBuf },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config(cli.config.as_deref())?;
    if cli.debug {
        cfg.parser.debug = true;
    }
    init_tracing(cfg.parser.debug);

    match cli.command {
        Command::Parse { file, format } => {
            let stmt = parse_file(&file, &cfg)?;
            match format.unwrap_or(cfg.output.format) {
                OutputFormat::Table => print!("{}", output::render_table(&stmt)),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&stmt).context("serialize statement")?)
                }
            }
        }

        Command::Summary { file } => {
            let stmt = parse_file(&file, &cfg)?;
            print!("{}", output::render_summary(&stmt));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => print!("{}", config::render_config(&cfg)?),
        },
    }

    Ok(())
}

fn parse_file(path: &Path, cfg: &Config) -> Result<ParsedStatement> {
    let text = state::read_statement_text(path)?;
    let parser = EntriesLayoutParser::new(cfg.parser.clone()).context("build statement parser")?;

    tracing::info!(parser = parser.name(), bytes = text.len(), file = %path.display(), "parsing statement text");
    let stmt = StatementParser::parse(&parser, &text);
    if stmt.transactions.is_empty() {
        tracing::warn!(file = %path.display(), "no entries recognized");
    }
    Ok(stmt)
}

fn init_tracing(debug: bool) {
    let default_level = if debug {
        "extrato=debug,extrato_ingest=debug,extrato_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
