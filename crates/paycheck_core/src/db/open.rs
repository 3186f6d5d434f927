//! Connection bootstrap for the embedded database.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - File-backed databases get their parent directory created on demand.

use super::migrations::apply_migrations;
use super::{DbConfig, DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

/// Opens the database described by `config` and applies pending migrations.
///
/// # Side effects
/// - Creates the adapter directory when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DbConfig) -> DbResult<Connection> {
    let Some(path) = config.file_path() else {
        return open_db_in_memory();
    };

    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file name={}",
        config.name
    );

    let opened = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .map_err(DbError::from)
        .and_then(|()| Connection::open(&path).map_err(DbError::from));

    finish_open(opened, "file", started_at)
}

/// Opens a process-local database and applies pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");
    finish_open(
        Connection::open_in_memory().map_err(DbError::from),
        "memory",
        started_at,
    )
}

fn finish_open(
    opened: DbResult<Connection>,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
