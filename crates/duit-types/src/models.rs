use serde::{Deserialize, Serialize};

/// Conversation identity assigned by the chat transport. One chat == one
/// session.
pub type ChatId = i64;

/// Direction of a ledger entry. Stored as 'IN' / 'OUT' in SQLite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::In => "IN",
            TxKind::Out => "OUT",
        }
    }
}
