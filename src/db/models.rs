use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student record. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Student {
    #[sqlx(rename = "s_id")]
    pub id: Option<i64>,
    #[sqlx(rename = "s_first_name")]
    pub first_name: Option<String>,
    #[sqlx(rename = "s_last_name")]
    pub last_name: Option<String>,
}

impl Student {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// A stored credential. `password` always holds the bcrypt hash, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    #[sqlx(rename = "u_username")]
    pub username: String,
    #[sqlx(rename = "u_password")]
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
        }
    }
}

/// A live login session. Deleted on logout or once `expires_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SessionRecord {
    pub session_id: String,
    pub username: String,
    pub authority: String,
    /// Unix seconds, UTC.
    pub expires_at: i64,
}
