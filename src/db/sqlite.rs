use crate::db::models::{SessionRecord, Student, User};
use crate::db::schema::SQLITE_INIT;
use crate::db::store::{SessionStore, StudentStore, UserStore};
use crate::error::RosterError;
use crate::pagination::Page;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the database at `database_url` and initialize the schema.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RosterError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RosterError> {
    // sqlx::query runs one statement at a time
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct SqliteStudentStore {
    pool: SqlitePool,
}

impl SqliteStudentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn find_page(&self, page: u32, size: u32) -> Result<Page<Student>, RosterError> {
        if size == 0 {
            return Err(RosterError::InvalidPageRequest { page, size });
        }
        // an offset past i64::MAX is past every row
        let offset = i64::from(page).checked_mul(i64::from(size));

        // count and slice from one snapshot
        let mut tx = self.pool.begin().await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM table_students")
            .fetch_one(&mut *tx)
            .await?;
        let items: Vec<Student> = match offset {
            Some(offset) => {
                sqlx::query_as(
                    r#"SELECT s_id, s_first_name, s_last_name
                       FROM table_students ORDER BY s_id LIMIT ? OFFSET ?"#,
                )
                .bind(i64::from(size))
                .bind(offset)
                .fetch_all(&mut *tx)
                .await?
            }
            None => Vec::new(),
        };
        tx.commit().await?;

        let total = u64::try_from(total.0).unwrap_or_default();
        debug!(page, size, total, fetched = items.len(), "student page loaded");
        Ok(Page::new(items, page, size, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, RosterError> {
        let row: Option<Student> = sqlx::query_as(
            r#"SELECT s_id, s_first_name, s_last_name
               FROM table_students WHERE s_id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, student: Student) -> Result<Student, RosterError> {
        let id = match student.id {
            None => {
                let res = sqlx::query(
                    "INSERT INTO table_students (s_first_name, s_last_name) VALUES (?, ?)",
                )
                .bind(student.first_name.as_deref())
                .bind(student.last_name.as_deref())
                .execute(&self.pool)
                .await?;
                res.last_insert_rowid()
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO table_students (s_id, s_first_name, s_last_name)
                    VALUES (?, ?, ?)
                    ON CONFLICT(s_id) DO UPDATE SET
                        s_first_name=excluded.s_first_name,
                        s_last_name=excluded.s_last_name
                    "#,
                )
                .bind(id)
                .bind(student.first_name.as_deref())
                .bind(student.last_name.as_deref())
                .execute(&self.pool)
                .await?;
                id
            }
        };
        Ok(Student {
            id: Some(id),
            ..student
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RosterError> {
        let res = sqlx::query("DELETE FROM table_students WHERE s_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, removed = res.rows_affected(), "student delete executed");
        Ok(())
    }
}

#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RosterError> {
        let row: Option<User> = sqlx::query_as(
            "SELECT u_username, u_password FROM table_users WHERE u_username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, user: User) -> Result<User, RosterError> {
        sqlx::query(
            r#"
            INSERT INTO table_users (u_username, u_password) VALUES (?, ?)
            ON CONFLICT(u_username) DO UPDATE SET u_password=excluded.u_password
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .execute(&self.pool)
        .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, record: SessionRecord) -> Result<(), RosterError> {
        sqlx::query(
            r#"
            INSERT INTO table_sessions (session_id, username, authority, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.session_id)
        .bind(&record.username)
        .bind(&record.authority)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<SessionRecord>, RosterError> {
        let row: Option<SessionRecord> = sqlx::query_as(
            r#"SELECT session_id, username, authority, expires_at
               FROM table_sessions WHERE session_id = ?"#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, session_id: &str) -> Result<(), RosterError> {
        sqlx::query("DELETE FROM table_sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_expired(&self, now: i64) -> Result<u64, RosterError> {
        let res = sqlx::query("DELETE FROM table_sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
