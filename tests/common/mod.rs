#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use student_roster::auth::PasswordCheck;
use student_roster::config::Config;
use student_roster::db::{SqlitePool, connect};
use student_roster::router::{RosterState, roster_router};
use tempfile::TempDir;
use tower::ServiceExt;

pub const USERNAME: &str = "toni";
pub const PASSWORD: &str = "asroma";

pub struct TestApp {
    pub app: Router,
    pub state: RosterState,
    pub pool: SqlitePool,
    _dir: TempDir,
}

/// Router over a fresh SQLite file with the default user seeded.
pub async fn spawn_app(page_size: u32) -> TestApp {
    spawn_app_with(page_size, None).await
}

/// As `spawn_app`, optionally replacing the login password check.
pub async fn spawn_app_with(page_size: u32, passwords: Option<PasswordCheck>) -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("roster.sqlite").display());
    let pool = connect(&database_url).await.expect("failed to open database");

    let cfg = Config {
        default_page_size: page_size,
        insecure_cookie: true,
        bcrypt_cost: 4,
        ..Config::default()
    };
    let mut state = RosterState::from_pool(pool.clone(), &cfg)
        .await
        .expect("failed to build state");
    if let Some(passwords) = passwords {
        state.passwords = passwords;
    }
    state
        .users
        .seed_default_user(USERNAME, PASSWORD, cfg.bcrypt_cost)
        .await
        .expect("failed to seed user");

    TestApp {
        app: roster_router(state.clone()),
        state,
        pool,
        _dir: dir,
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut req = Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).expect("failed to build request"))
        .await
        .expect("request failed")
}

pub async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    app.clone()
        .oneshot(
            req.body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

/// `name=value` of the session cookie set by `resp`, if any.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("roster_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

/// Log in as the seeded user and return the session cookie.
pub async fn login(app: &Router) -> String {
    let resp = post_form(
        app,
        "/login",
        &format!("username={USERNAME}&password={PASSWORD}"),
        None,
    )
    .await;
    session_cookie(&resp).expect("login did not set a session cookie")
}
