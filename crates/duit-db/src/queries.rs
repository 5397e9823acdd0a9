use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::Database;
use crate::models::UserRow;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        username: &str,
        password_hash: &str,
        created_at: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                (id, username, password_hash, created_at),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Transactions --

    pub fn insert_transaction(
        &self,
        id: &str,
        user_id: &str,
        kind: &str,
        amount: i64,
        note: Option<&str>,
        ts: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO transactions (id, user_id, type, amount, note, ts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, user_id, kind, amount, note, ts],
            )?;
            Ok(())
        })
    }

    /// Total amount for one user and kind with `ts` in `[start, end)`.
    /// Timestamps are fixed-width RFC 3339 text in a single offset, so the
    /// lexicographic comparison below is chronological. 0 when no rows match.
    pub fn sum_in_range(&self, user_id: &str, kind: &str, start: &str, end: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let total = conn.query_row(
                "SELECT COALESCE(SUM(amount), 0) FROM transactions
                 WHERE user_id = ?1 AND type = ?2 AND ts >= ?3 AND ts < ?4",
                rusqlite::params![user_id, kind, start, end],
                |row| row.get(0),
            )?;
            Ok(total)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}
