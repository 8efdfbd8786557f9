use axum::{
    Router,
    extract::FromRef,
    response::Redirect,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::password::PasswordCheck;
use crate::config::Config;
use crate::db::{SqlitePool, SqliteSessionStore, SqliteStudentStore, SqliteUserStore};
use crate::error::RosterError;
use crate::handlers::{login, students};
use crate::service::{SessionService, StudentService, UserService};

/// Shared handler state; every collaborator is built once at start and cloned per request.
#[derive(Clone)]
pub struct RosterState {
    pub students: StudentService,
    pub users: UserService,
    pub sessions: SessionService,
    pub passwords: PasswordCheck,
    pub default_page_size: u32,
    pub insecure_cookie: bool,
    cookie_key: Key,
}

impl RosterState {
    pub fn new(
        students: StudentService,
        users: UserService,
        sessions: SessionService,
        passwords: PasswordCheck,
        cookie_key: Key,
        default_page_size: u32,
        insecure_cookie: bool,
    ) -> Self {
        Self {
            students,
            users,
            sessions,
            passwords,
            default_page_size,
            insecure_cookie,
            cookie_key,
        }
    }

    /// Wire SQLite-backed services from an open pool.
    pub async fn from_pool(pool: SqlitePool, cfg: &Config) -> Result<Self, RosterError> {
        let students = StudentService::new(Arc::new(SqliteStudentStore::new(pool.clone())));
        let users = UserService::new(Arc::new(SqliteUserStore::new(pool.clone())));
        let sessions = SessionService::new(Arc::new(SqliteSessionStore::new(pool)));
        let passwords = PasswordCheck::new(cfg.bcrypt_cost).await?;
        Ok(Self::new(
            students,
            users,
            sessions,
            passwords,
            cfg.cookie_key()?,
            cfg.page_size(),
            cfg.insecure_cookie,
        ))
    }
}

impl FromRef<RosterState> for Key {
    fn from_ref(state: &RosterState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<RosterState> for SessionService {
    fn from_ref(state: &RosterState) -> Self {
        state.sessions.clone()
    }
}

pub fn roster_router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(login::SUCCESS_PATH) }))
        .route("/students", get(students::index))
        .route("/students/", get(students::index))
        .route("/students/list", get(students::list))
        .route("/students/view", get(students::view))
        .route("/students/add", get(students::add))
        .route("/students/edit", get(students::edit))
        .route(
            "/students/delete",
            get(students::confirm_delete).post(students::delete),
        )
        .route("/students/save", post(students::save))
        .route("/login", get(login::login_page).post(login::login_submit))
        .route("/logout", post(login::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
