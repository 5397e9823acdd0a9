use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id             TEXT PRIMARY KEY,
            username       TEXT NOT NULL UNIQUE,
            password_hash  TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS transactions (
            id        TEXT PRIMARY KEY,
            user_id   TEXT NOT NULL REFERENCES users(id),
            type      TEXT NOT NULL CHECK(type IN ('IN','OUT')),
            amount    INTEGER NOT NULL CHECK(amount >= 0),
            note      TEXT,
            ts        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_user_type_ts
            ON transactions(user_id, type, ts);
        ",
    )?;

    info!("database migrations complete");
    Ok(())
}
