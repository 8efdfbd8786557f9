//! Authentication: credential hashing, principals and the session cookie.

pub mod password;
pub mod principal;
pub mod session;

pub use password::PasswordCheck;
pub use principal::{Authority, LookupFailure, Principal};
pub use session::{SESSION_COOKIE, SESSION_TTL, SessionUser};
