use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::auth::session::{attach_session, end_session, session_id};
use crate::views;
use crate::{RosterError, router::RosterState};

/// Where a successful login lands.
pub const SUCCESS_PATH: &str = "/students/";
const FAILURE_PATH: &str = "/login?error";
const LOGGED_OUT_PATH: &str = "/login?logout";

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

/// Missing fields arrive empty and fail like any other bad credential.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Html<String> {
    views::login(query.error.is_some(), query.logout.is_some())
}

/// POST /login -> verifies the password against the stored hash and starts a session.
///
/// An unknown username and a wrong password produce the same redirect, and
/// both pay for a bcrypt verify.
pub async fn login_submit(
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, RosterError> {
    let principal = match state.users.authenticate(&form.username).await {
        Ok(principal) => Some(principal),
        Err(RosterError::UserNotFound(failure)) => {
            debug!("{}", failure);
            None
        }
        Err(e) => return Err(e),
    };

    let stored = principal.as_ref().map(|p| p.password_hash.as_str());
    let matched = state.passwords.verify(&form.password, stored).await?;
    let (true, Some(principal)) = (matched, principal) else {
        warn!(username = %form.username, "login rejected: bad credentials");
        return Ok(Redirect::to(FAILURE_PATH).into_response());
    };

    if let Some(previous) = session_id(&jar) {
        state.sessions.end(&previous).await?;
    }
    let id = state.sessions.start(&principal).await?;
    let jar = attach_session(jar, id, state.insecure_cookie);
    info!(username = %principal.username, authority = %principal.authority, "login accepted");
    Ok((jar, Redirect::to(SUCCESS_PATH)).into_response())
}

/// POST /logout -> ends the server-side session and clears the cookie.
pub async fn logout(
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, RosterError> {
    if let Some(id) = session_id(&jar) {
        state.sessions.end(&id).await?;
    }
    Ok((end_session(jar), Redirect::to(LOGGED_OUT_PATH)))
}
