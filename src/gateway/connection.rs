use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Open (creating if needed) the SQLite file at `path` and make sure the schema
/// exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Lazy migration: create the `monkeys` table when it is missing.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS monkeys (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            species TEXT NOT NULL,
            age INTEGER,
            habitat TEXT,
            favorite_food TEXT,
            diet TEXT,
            fun_fact TEXT,
            image_url TEXT,
            is_endangered INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("failed to create monkeys table")?;

    Ok(())
}
