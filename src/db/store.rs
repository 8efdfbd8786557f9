use async_trait::async_trait;

use crate::db::models::{SessionRecord, Student, User};
use crate::error::RosterError;
use crate::pagination::Page;

/// Persistence for student records.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Zero-based page `page` of `size` records, ordered by id. `size` must be non-zero.
    async fn find_page(&self, page: u32, size: u32) -> Result<Page<Student>, RosterError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, RosterError>;

    /// Insert when `student.id` is `None`, otherwise write the row with that id.
    /// Returns the record as stored, id included.
    async fn save(&self, student: Student) -> Result<Student, RosterError>;

    /// Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), RosterError>;
}

/// Persistence for login credentials.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive match on username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RosterError>;

    /// Insert or replace by username.
    async fn save(&self, user: User) -> Result<User, RosterError>;
}

/// Server-side login sessions, keyed by the id sealed into the session cookie.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, record: SessionRecord) -> Result<(), RosterError>;

    async fn find(&self, session_id: &str) -> Result<Option<SessionRecord>, RosterError>;

    /// Deleting an absent id is a no-op.
    async fn delete(&self, session_id: &str) -> Result<(), RosterError>;

    /// Remove every session with `expires_at <= now`; returns how many went.
    async fn delete_expired(&self, now: i64) -> Result<u64, RosterError>;
}
