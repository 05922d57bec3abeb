//! endict - English-Chinese dictionary lookup
//!
//! Thin CLI over the lookup engine: bulk import into the on-disk store,
//! one-shot lookups against either backend, and an interactive loop.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use endict::prelude::*;

#[derive(Parser)]
#[command(name = "endict")]
#[command(about = "English-Chinese dictionary with prefix search and spelling correction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Storage backend to query against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Full in-memory map, rebuilt from the data file on every run
    Memory,
    /// Ordered on-disk table built by `endict import`
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the on-disk store from the tab-delimited data file
    Import {
        /// Data file (word<TAB>definition per line)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Store directory to create
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Look up a single word
    Lookup {
        /// Query word
        word: String,

        /// Storage backend
        #[arg(short, long, default_value = "memory")]
        backend: Backend,

        /// Data file (memory backend)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Store directory (table backend)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Interactive lookup loop
    Repl {
        /// Storage backend
        #[arg(short, long, default_value = "memory")]
        backend: Backend,

        /// Data file (memory backend)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Store directory (table backend)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show on-disk store statistics
    Info {
        /// Store directory
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Import { data, db } => run_import(data, db),
        Commands::Lookup {
            word,
            backend,
            data,
            db,
        } => match backend {
            Backend::Memory => with_memory_store(data, |s| run_lookup(s, &word)),
            Backend::Table => with_table_store(db, |s| run_lookup(s, &word)),
        },
        Commands::Repl { backend, data, db } => match backend {
            Backend::Memory => with_memory_store(data, run_repl),
            Backend::Table => with_table_store(db, run_repl),
        },
        Commands::Info { db } => run_info(db),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

/// Application data directory, `~/.local/share/endict` or the platform
/// equivalent.
fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("could not determine local data directory")?;
    Ok(base.join("endict"))
}

fn resolve_data_path(data: Option<PathBuf>) -> Result<PathBuf> {
    match data {
        Some(path) => Ok(path),
        None => Ok(data_dir()?.join("endict.txt")),
    }
}

fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    match db {
        Some(path) => Ok(path),
        None => Ok(data_dir()?.join("dictionary-db")),
    }
}

fn with_memory_store<F>(data: Option<PathBuf>, f: F) -> Result<()>
where
    F: FnOnce(MemoryStore) -> Result<()>,
{
    let path = resolve_data_path(data)?;
    let store = MemoryStore::load(&path)
        .with_context(|| format!("loading dictionary data from {}", path.display()))?;
    f(store)
}

fn with_table_store<F>(db: Option<PathBuf>, f: F) -> Result<()>
where
    F: FnOnce(TableStore) -> Result<()>,
{
    let path = resolve_db_path(db)?;
    let store = TableStore::open(&path)
        .with_context(|| format!("opening store at {} (run `endict import` first?)", path.display()))?;
    f(store)
}

fn run_import(data: Option<PathBuf>, db: Option<PathBuf>) -> Result<()> {
    let data_path = resolve_data_path(data)?;
    let db_path = resolve_db_path(db)?;

    let mut store = TableStore::import_file(&db_path, &data_path)
        .with_context(|| format!("importing {} into {}", data_path.display(), db_path.display()))?;
    let stats = store.stats();
    store.close()?;

    println!(
        "Imported {} entries into {}",
        stats.entries.to_string().green().bold(),
        db_path.display().to_string().cyan()
    );
    Ok(())
}

fn run_lookup<S: WordStore>(store: S, word: &str) -> Result<()> {
    let mut resolver = Resolver::new(store);
    let result = resolver.lookup_result(word)?;
    print_result(&result);
    resolver.close()?;
    Ok(())
}

fn run_repl<S: WordStore>(store: S) -> Result<()> {
    let mut resolver = Resolver::new(store);
    let mut editor = DefaultEditor::new()?;

    println!();
    println!("  {}", "endict - English-Chinese dictionary".bright_cyan().bold());
    println!(
        "  Type a word to look it up, {} or {} to quit",
        "'exit'".yellow().bold(),
        "Ctrl+D".yellow().bold()
    );
    println!();

    loop {
        match editor.readline(&format!("{} ", "endict>".bright_cyan())) {
            Ok(line) => {
                let word = line.trim();
                if word.is_empty() {
                    continue;
                }
                if word == "exit" || word == "quit" {
                    break;
                }
                let _ = editor.add_history_entry(word);
                match resolver.lookup_result(word) {
                    Ok(result) => print_result(&result),
                    // Lookup failures don't end the session, but they must
                    // read as failures, never as "no definition".
                    Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}: {:?}", "Readline error".red().bold(), err);
                break;
            }
        }
    }

    // Releases the on-disk lock on exit, ^C and ^D alike.
    resolver.close()?;
    Ok(())
}

fn run_info(db: Option<PathBuf>) -> Result<()> {
    let path = resolve_db_path(db)?;
    let mut store = TableStore::open(&path)
        .with_context(|| format!("opening store at {}", path.display()))?;
    let stats = store.stats();
    store.close()?;

    println!("Store:          {}", path.display().to_string().cyan());
    println!("Entries:        {}", stats.entries.to_string().green());
    println!("Resident index: {} bytes", stats.resident_bytes.to_string().green());
    Ok(())
}

fn print_result(result: &str) {
    if result.is_empty() {
        println!("{}", "not found".yellow());
    } else {
        println!("{result}");
    }
}
