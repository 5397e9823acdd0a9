/// Raw SQLite rows. Kept separate from the `duit-types` API models so the
/// storage layer stays independent of how the core interprets a row.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}
