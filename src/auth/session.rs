use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;

use crate::auth::principal::{Authority, Principal};

pub const SESSION_COOKIE: &str = "roster_session";

/// Lifetime of a server-side session and of the cookie pointing at it.
pub const SESSION_TTL: Duration = Duration::hours(8);

/// The authenticated user behind a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub authority: Authority,
}

impl From<&Principal> for SessionUser {
    fn from(p: &Principal) -> Self {
        Self {
            username: p.username.clone(),
            authority: p.authority,
        }
    }
}

impl SessionUser {
    pub fn has_authority(&self, authority: Authority) -> bool {
        self.authority == authority
    }
}

/// Point the encrypted session cookie at `session_id`.
pub fn attach_session(
    jar: PrivateCookieJar,
    session_id: String,
    insecure: bool,
) -> PrivateCookieJar {
    jar.add(build_cookie(SESSION_COOKIE, session_id, insecure))
}

/// Session id carried by the jar. Cookies sealed under another key yield `None`.
pub fn session_id(jar: &PrivateCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty())
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(clear_cookie(SESSION_COOKIE))
}

fn build_cookie(name: &str, value: String, insecure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), value))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL)
        .build()
}

fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
