use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use tracing::debug;

use crate::auth::principal::Authority;
use crate::auth::session::{SessionUser, session_id};
use crate::service::SessionService;

pub const LOGIN_PATH: &str = "/login";

/// Ensure the request carries a live session granting `authority`.
/// Anything else (no cookie, a cookie encrypted under another key,
/// a session ended by logout or past its expiry) is sent to the login form.
pub async fn ensure_authorized(
    jar: &PrivateCookieJar,
    sessions: &SessionService,
    authority: Authority,
) -> Result<SessionUser, Response> {
    let Some(id) = session_id(jar) else {
        return Err(Redirect::to(LOGIN_PATH).into_response());
    };
    match sessions.resolve(&id).await {
        Ok(Some(user)) if user.has_authority(authority) => Ok(user),
        Ok(Some(user)) => {
            debug!(username = %user.username, required = %authority, "session lacks authority");
            Err(Redirect::to(LOGIN_PATH).into_response())
        }
        Ok(None) => {
            debug!("session cookie names no live session");
            Err(Redirect::to(LOGIN_PATH).into_response())
        }
        Err(e) => Err(e.into_response()),
    }
}

/// Extractor for routes restricted to the `USER` authority.
#[derive(Debug, Clone)]
pub struct RequireUser(pub SessionUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionService: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let sessions = SessionService::from_ref(state);
        let user = ensure_authorized(&jar, &sessions, Authority::User).await?;
        Ok(Self(user))
    }
}
