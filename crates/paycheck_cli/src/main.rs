//! CLI probe for the paycheck core.
//!
//! # Responsibility
//! - Verify `paycheck_core` linkage (`ping`, `version`).
//! - Inspect an existing sheet database (`list`, `show`) without creating one.

use clap::{Parser, Subcommand};
use paycheck_core::db::{open_db, Adapter, DbConfig};
use paycheck_core::{DocStore, EmbeddedStore, PaycheckDoc, DEFAULT_DB_NAME};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Paycheck sheet inspection tool.
#[derive(Parser, Debug)]
#[command(name = "paycheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print ping/version probe lines
    Ping,

    /// Print the core crate version
    Version,

    /// List sheet ids, optionally filtered by prefix
    List {
        /// Directory holding the sheet database
        data_dir: PathBuf,

        /// Id prefix, e.g. `2024-01`
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Show one sheet
    Show {
        /// Directory holding the sheet database
        data_dir: PathBuf,

        /// Sheet id
        id: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command.unwrap_or(Commands::Ping)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Ping => {
            println!("paycheck_core ping={}", paycheck_core::ping());
            println!("paycheck_core version={}", paycheck_core::core_version());
        }
        Commands::Version => println!("{}", paycheck_core::core_version()),
        Commands::List { data_dir, prefix } => {
            let conn = open_existing(&data_dir)?;
            let store = sheet_store(&conn)?;
            for id in store.list(&prefix).map_err(|err| err.to_string())? {
                println!("{id}");
            }
        }
        Commands::Show { data_dir, id } => {
            let conn = open_existing(&data_dir)?;
            let sheet = sheet_store(&conn)?
                .get(&id)
                .map_err(|err| err.to_string())?;
            println!(
                "id={} date={} income={} leftover={} rev={}",
                sheet.id,
                sheet.date,
                sheet.income,
                sheet.leftover,
                sheet.rev.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

/// Opens the sheet database under `data_dir`, refusing to create a new one.
fn open_existing(data_dir: &Path) -> Result<Connection, String> {
    let config = DbConfig::new(DEFAULT_DB_NAME, Adapter::File(data_dir.to_path_buf()));
    let path = config
        .file_path()
        .ok_or_else(|| "file adapter has no database path".to_string())?;
    if !path.is_file() {
        return Err(format!("no sheet database at `{}`", path.display()));
    }
    open_db(&config).map_err(|err| err.to_string())
}

fn sheet_store(conn: &Connection) -> Result<EmbeddedStore<'_, PaycheckDoc>, String> {
    EmbeddedStore::try_new(conn).map_err(|err| err.to_string())
}
