use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Prefix for environment overrides, e.g. `ROSTER_DATABASE_URL`.
pub const ENV_PREFIX: &str = "ROSTER_";

/// Minimum secret length accepted for the private-cookie key.
pub const MIN_COOKIE_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub default_page_size: u32,
    /// Secret for encrypting the session cookie. A random key is generated
    /// when unset, which invalidates sessions on restart.
    pub cookie_secret: Option<String>,
    /// Drop the `Secure` attribute from the session cookie (plain HTTP dev setups).
    pub insecure_cookie: bool,
    pub bcrypt_cost: u32,
    pub seed_username: String,
    pub seed_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://roster.sqlite".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            default_page_size: 10,
            cookie_secret: None,
            insecure_cookie: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            seed_username: "toni".to_string(),
            seed_password: "asroma".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `roster.toml`, then `ROSTER_*` environment variables.
    pub fn load() -> Result<Self, RosterError> {
        Self::figment().extract().map_err(RosterError::from)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn cookie_key(&self) -> Result<Key, RosterError> {
        match self.cookie_secret.as_deref() {
            None => Ok(Key::generate()),
            Some(secret) if secret.len() < MIN_COOKIE_SECRET_LEN => Err(RosterError::Config(
                format!("cookie_secret must be at least {MIN_COOKIE_SECRET_LEN} bytes"),
            )),
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|e| RosterError::Config(format!("invalid cookie_secret: {e}"))),
        }
    }

    /// Page size used by the listing when the request leaves it out; never zero.
    pub fn page_size(&self) -> u32 {
        self.default_page_size.max(1)
    }
}
