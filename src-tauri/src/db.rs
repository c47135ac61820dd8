
// Handles the SQLite settings store

use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::Path;

/// Base URL of the generation service.
pub const SERVER_URL: &str = "server_url";
/// Directory the last generated file was saved into.
pub const LAST_SAVE_DIR: &str = "last_save_dir";

pub const WINDOW_X: &str = "window_x";
pub const WINDOW_Y: &str = "window_y";
pub const WINDOW_WIDTH: &str = "window_width";
pub const WINDOW_HEIGHT: &str = "window_height";


// Open (or create) the settings database in the app data directory
pub fn init_db(data_dir: &Path) -> rusqlite::Result<Connection> {
    if !data_dir.exists() {
        if let Err(e) = fs::create_dir_all(data_dir) {
            log::error!("Failed to create {}: {}", data_dir.display(), e);
        }
    }

    let conn = Connection::open(data_dir.join("vmap.db"))?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_config (
            key TEXT PRIMARY KEY,
            value TEXT
        )",
        [],
    )?;
    Ok(())
}

/// Inserts or updates a configuration key-value pair.
pub fn update_config_value(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_config (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

/// Retrieves a configuration value by key. Returns `None` if the key doesn't exist.
pub fn get_config_value(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_config WHERE key = ?1",
        [key],
        |row| row.get(0),
    ).optional()
}

/// Reads an integer setting, ignoring values that don't parse.
pub fn get_config_i64(conn: &Connection, key: &str) -> rusqlite::Result<Option<i64>> {
    Ok(get_config_value(conn, key)?.and_then(|v| v.parse().ok()))
}
