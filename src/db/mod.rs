use anyhow::Result;
use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::models::Settings;


pub type DbPool = Pool<SqliteConnectionManager>;

pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path);
    let pool = Pool::new(manager)?;
    Ok(pool)
}

pub fn init_database(pool: &DbPool) -> Result<()> {
    let conn = pool.get()?;

    // Single row, pinned to id 1
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            discogs_username TEXT,
            sonos_enabled INTEGER NOT NULL DEFAULT 1,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Read the stored settings, or the defaults when nothing was saved yet.
pub fn get_settings(pool: &DbPool) -> Result<Settings> {
    let conn = pool.get()?;

    let result = conn.query_row(
        "SELECT discogs_username, sonos_enabled, updated_at FROM settings WHERE id = 1",
        [],
        |row| {
            let updated_at: i64 = row.get(2)?;
            Ok(Settings {
                username: row.get(0)?,
                sonos_enabled: row.get(1)?,
                updated_at: DateTime::from_timestamp(updated_at, 0).unwrap_or_else(Utc::now),
            })
        },
    );

    match result {
        Ok(settings) => Ok(settings),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Replace the stored settings. Returns them with the new `updated_at`.
pub fn save_settings(pool: &DbPool, settings: &Settings) -> Result<Settings> {
    let conn = pool.get()?;
    let now = Utc::now();

    conn.execute(
        "INSERT INTO settings (id, discogs_username, sonos_enabled, updated_at)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            discogs_username = ?1, sonos_enabled = ?2, updated_at = ?3",
        params![settings.username, settings.sonos_enabled, now.timestamp()],
    )?;

    Ok(Settings {
        updated_at: now,
        ..settings.clone()
    })
}

/// Store `username` unless a username is already saved.
pub fn seed_username(pool: &DbPool, username: &str) -> Result<bool> {
    let settings = get_settings(pool)?;
    if settings.username().is_some() {
        return Ok(false);
    }

    save_settings(pool, &settings.with_username(username.to_string()))?;
    tracing::info!("Seeded stored Discogs username from environment");
    Ok(true)
}
