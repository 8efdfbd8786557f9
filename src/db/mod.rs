//! Database module: record store contracts and their SQLite implementation.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: the store traits the services depend on
//! - `sqlite.rs`: sqlx-backed stores

pub mod models;
pub mod schema;
pub mod sqlite;
pub mod store;

pub use models::{SessionRecord, Student, User};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, SqliteSessionStore, SqliteStudentStore, SqliteUserStore, connect};
pub use store::{SessionStore, StudentStore, UserStore};
