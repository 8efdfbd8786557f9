use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::password::hash_password;
use crate::auth::principal::{Authority, LookupFailure, Principal};
use crate::db::models::User;
use crate::db::store::UserStore;
use crate::error::RosterError;

/// Resolves usernames to principals for the login flow.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Look up `username` and map the stored credential to a `Principal`
    /// holding the `USER` authority. Fails with `RosterError::UserNotFound`
    /// when nothing is stored under that exact name.
    pub async fn authenticate(&self, username: &str) -> Result<Principal, RosterError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            debug!(username, "credential lookup missed");
            return Err(LookupFailure::new(username).into());
        };

        Ok(Principal {
            username: user.username,
            password_hash: user.password,
            authority: Authority::User,
        })
    }

    pub async fn save(&self, user: User) -> Result<User, RosterError> {
        self.store.save(user).await
    }

    /// Store `username` with a bcrypt hash of `password` unless a credential
    /// already exists under that name. Returns whether a record was created.
    pub async fn seed_default_user(
        &self,
        username: &str,
        password: &str,
        cost: u32,
    ) -> Result<bool, RosterError> {
        if self.store.find_by_username(username).await?.is_some() {
            debug!(username, "seed user already present");
            return Ok(false);
        }
        let hashed = hash_password(password, cost).await?;
        self.store.save(User::new(username, hashed)).await?;
        info!(username, "seed user created");
        Ok(true)
    }
}
