//! Dataquery CLI
//!
//! Loads JSON Lines records into memory and answers queries, either once
//! (`dq query ...`) or as a line-oriented session on stdin (`dq shell`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dataquery::config::CONFIG_ENV;
use dataquery::{Config, Database};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// In-memory record store with a textual query language
#[derive(Parser)]
#[command(name = "dq")]
#[command(about = "Query in-memory records with EQUAL/GREATER_THAN/LESS_THAN/NOT/AND/OR", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (JSON)
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// JSONL record files to load, after the configured seed files
    #[arg(long = "load", short = 'l')]
    load: Vec<PathBuf>,

    /// Compact JSON output (overrides config)
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print matching records
    Query {
        /// Query string, e.g. "EQUAL(title,'request')"
        query: String,
    },

    /// Read `GET <query>` / `POST <json>` lines from stdin
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut db = Database::new().with_pretty(config.pretty && !cli.compact);
    for path in config.seed_files.iter().chain(cli.load.iter()) {
        load_file(&mut db, path)?;
    }

    match cli.command {
        Commands::Query { query } => {
            println!("{}", db.get(&query)?);
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_shell(&mut db, stdin.lock(), &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn load_file(db: &mut Database, path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    db.load_jsonl(BufReader::new(file))
        .with_context(|| format!("cannot load {}", path.display()))?;
    Ok(())
}

/// Process session lines until EOF. Request errors are reported inline and
/// do not end the session.
fn run_shell<R: BufRead, W: Write>(db: &mut Database, input: R, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match line.split_once(' ') {
            Some(("GET", query)) => db.get(query),
            Some(("POST", data)) => db.post(data).map(|ok| ok.to_string()),
            _ => {
                writeln!(out, "error: expected GET <query> or POST <json>")?;
                continue;
            }
        };

        match response {
            Ok(body) => writeln!(out, "{}", body)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
    Ok(())
}
