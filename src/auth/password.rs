//! bcrypt hashing, run off the async runtime.

use crate::error::RosterError;
use bcrypt::{hash, verify};
use std::sync::Arc;
use uuid::Uuid;

/// Hash `password` with bcrypt at the given cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, RosterError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| RosterError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| RosterError::PasswordHash(format!("Task join error: {}", e)))?
}

/// `Ok(true)` when `password` matches `hashed`.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, RosterError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed).map_err(|e| RosterError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| RosterError::PasswordHash(format!("Task join error: {}", e)))?
}

/// Login-time password check. An unknown username still pays for one bcrypt
/// verify, against a hash of a random password, so both rejections cost the same.
#[derive(Clone)]
pub struct PasswordCheck {
    unknown_user_hash: Arc<str>,
}

impl PasswordCheck {
    /// Hash a throwaway password at `cost`; use the cost stored credentials are hashed with.
    pub async fn new(cost: u32) -> Result<Self, RosterError> {
        let hashed = hash_password(&Uuid::new_v4().to_string(), cost).await?;
        Ok(Self::with_unknown_user_hash(hashed))
    }

    pub fn with_unknown_user_hash(hashed: impl Into<Arc<str>>) -> Self {
        Self {
            unknown_user_hash: hashed.into(),
        }
    }

    /// `stored` is the credential's hash, `None` when the username is unknown.
    /// The unknown case never matches.
    pub async fn verify(&self, password: &str, stored: Option<&str>) -> Result<bool, RosterError> {
        match stored {
            Some(hashed) => verify_password(password, hashed).await,
            None => {
                verify_password(password, &self.unknown_user_hash).await?;
                Ok(false)
            }
        }
    }
}
