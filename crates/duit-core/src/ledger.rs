use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use uuid::Uuid;

use duit_db::Database;
use duit_types::models::TxKind;

use crate::clock::{now_wita, to_db_timestamp};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be a non-negative integer")]
    InvalidAmount,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct LedgerStore {
    db: Arc<Database>,
}

impl LedgerStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Append one entry. The timestamp comes from the store's own +08:00
    /// clock at insertion time, never from the caller.
    pub fn record(
        &self,
        user_id: Uuid,
        kind: TxKind,
        amount: i64,
        note: Option<&str>,
    ) -> Result<Uuid, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let id = Uuid::new_v4();
        let ts = to_db_timestamp(now_wita());
        self.db.insert_transaction(
            &id.to_string(),
            &user_id.to_string(),
            kind.as_str(),
            amount,
            note,
            &ts,
        )?;

        Ok(id)
    }

    /// Total of entries of `kind` for `user_id` whose timestamp falls in
    /// `[start, end)`. 0 when nothing matches.
    pub fn sum_in_range(
        &self,
        user_id: Uuid,
        kind: TxKind,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<i64, LedgerError> {
        let total = self.db.sum_in_range(
            &user_id.to_string(),
            kind.as_str(),
            &to_db_timestamp(start),
            &to_db_timestamp(end),
        )?;
        Ok(total)
    }
}
