use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;
use uuid::Uuid;

use duit_db::Database;

use crate::clock::{now_wita, to_db_timestamp};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("username must be at least {MIN_USERNAME_LEN} characters")]
    InvalidUsername,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    InvalidPassword,
    #[error("username is already taken")]
    DuplicateUsername,
    /// Unknown username and wrong password both collapse into this variant,
    /// so callers cannot enumerate accounts.
    #[error("invalid username or password")]
    AuthFailure,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// The identity handed to the session manager after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

pub struct CredentialStore {
    db: Arc<Database>,
}

impl CredentialStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Used by the registration dialogue to re-prompt before a password is
    /// ever asked for.
    pub fn username_taken(&self, username: &str) -> Result<bool, CredentialError> {
        Ok(self.db.get_user_by_username(username)?.is_some())
    }

    pub fn register(&self, username: &str, password: &str) -> Result<Uuid, CredentialError> {
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(CredentialError::InvalidUsername);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialError::InvalidPassword);
        }
        if self.username_taken(username)? {
            return Err(CredentialError::DuplicateUsername);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
            .to_string();

        let user_id = Uuid::new_v4();
        let created_at = to_db_timestamp(now_wita());
        self.db
            .create_user(&user_id.to_string(), username, &password_hash, &created_at)?;

        Ok(user_id)
    }

    /// Look up a user and check the password against the stored argon2
    /// hash. Unknown usernames and mismatches are indistinguishable here.
    pub fn verify(&self, username: &str, password: &str) -> Result<AuthUser, CredentialError> {
        let Some(row) = self.db.get_user_by_username(username)? else {
            return Err(CredentialError::AuthFailure);
        };

        let parsed = PasswordHash::new(&row.password_hash)
            .map_err(|e| anyhow::anyhow!("stored hash for '{username}' unreadable: {e}"))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| CredentialError::AuthFailure)?;

        let user_id = row
            .id
            .parse::<Uuid>()
            .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {e}", row.id))?;

        Ok(AuthUser {
            user_id,
            username: row.username,
        })
    }
}
