//! SQL DDL for initializing the roster storage.

/// SQLite schema with:
/// - `table_students.s_id` INTEGER PRIMARY KEY AUTOINCREMENT (store-assigned, never reused)
/// - `table_users.u_username` TEXT PRIMARY KEY (case-sensitive, the credential identity)
/// - `table_users.u_password` holds a bcrypt hash
/// - `table_sessions.session_id` TEXT PRIMARY KEY (random id sealed into the session cookie)
/// - `table_sessions.expires_at` unix seconds, UTC
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS table_students (
    s_id INTEGER PRIMARY KEY AUTOINCREMENT,
    s_first_name TEXT NULL,
    s_last_name TEXT NULL
);

CREATE TABLE IF NOT EXISTS table_users (
    u_username TEXT PRIMARY KEY NOT NULL,
    u_password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS table_sessions (
    session_id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL,
    authority TEXT NOT NULL,
    expires_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON table_sessions(expires_at);
"#;
