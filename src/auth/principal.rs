use std::fmt;
use std::str::FromStr;
use thiserror::Error as ThisError;

use crate::error::RosterError;

/// The single authority granted to every stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    User,
}

impl Authority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::User => "USER",
        }
    }
}

impl FromStr for Authority {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Authority::User),
            other => Err(RosterError::UnknownAuthority(other.to_string())),
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity resolved from the credential store, handed to the password check.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    /// bcrypt hash as stored.
    pub password_hash: String,
    pub authority: Authority,
}

// keep the hash out of logs
impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("username", &self.username)
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}

/// No credential is stored under the queried username.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("User not found - {username}")]
pub struct LookupFailure {
    pub username: String,
}

impl LookupFailure {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_labels() {
        assert_eq!(Authority::User.to_string(), "USER");
        assert_eq!("USER".parse::<Authority>().unwrap(), Authority::User);
    }

    #[test]
    fn unknown_authority_is_rejected() {
        assert!(matches!(
            "ADMIN".parse::<Authority>(),
            Err(RosterError::UnknownAuthority(label)) if label == "ADMIN"
        ));
        assert!("user".parse::<Authority>().is_err());
    }

    #[test]
    fn lookup_failure_message_names_username() {
        assert_eq!(
            LookupFailure::new("ghost").to_string(),
            "User not found - ghost"
        );
    }

    #[test]
    fn principal_debug_hides_hash() {
        let p = Principal {
            username: "toni".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            authority: Authority::User,
        };
        let out = format!("{p:?}");
        assert!(out.contains("toni"));
        assert!(!out.contains("secret"));
    }
}
