use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::principal::Principal;
use crate::auth::session::{SESSION_TTL, SessionUser};
use crate::db::models::SessionRecord;
use crate::db::store::SessionStore;
use crate::error::RosterError;

/// Issues, resolves and revokes server-side login sessions.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_ttl(store, SESSION_TTL)
    }

    pub fn with_ttl(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Record a new session for `principal` and return its id.
    pub async fn start(&self, principal: &Principal) -> Result<String, RosterError> {
        let session_id = Uuid::new_v4().to_string();
        let expires_at = (OffsetDateTime::now_utc() + self.ttl).unix_timestamp();
        self.store
            .create(SessionRecord {
                session_id: session_id.clone(),
                username: principal.username.clone(),
                authority: principal.authority.as_str().to_string(),
                expires_at,
            })
            .await?;
        Ok(session_id)
    }

    /// The user behind `session_id`, or `None` when it was ended or has expired.
    pub async fn resolve(&self, session_id: &str) -> Result<Option<SessionUser>, RosterError> {
        let Some(record) = self.store.find(session_id).await? else {
            return Ok(None);
        };
        if record.expires_at <= now() {
            debug!(username = %record.username, "session expired");
            self.store.delete(session_id).await?;
            return Ok(None);
        }
        Ok(Some(SessionUser {
            username: record.username,
            authority: record.authority.parse()?,
        }))
    }

    pub async fn end(&self, session_id: &str) -> Result<(), RosterError> {
        self.store.delete(session_id).await
    }

    pub async fn purge_expired(&self) -> Result<u64, RosterError> {
        let removed = self.store.delete_expired(now()).await?;
        if removed > 0 {
            info!(removed, "expired sessions purged");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::principal::Authority;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySessionStore {
        rows: Mutex<HashMap<String, SessionRecord>>,
    }

    #[async_trait]
    impl SessionStore for MemorySessionStore {
        async fn create(&self, record: SessionRecord) -> Result<(), RosterError> {
            self.rows
                .lock()
                .unwrap()
                .insert(record.session_id.clone(), record);
            Ok(())
        }

        async fn find(&self, session_id: &str) -> Result<Option<SessionRecord>, RosterError> {
            Ok(self.rows.lock().unwrap().get(session_id).cloned())
        }

        async fn delete(&self, session_id: &str) -> Result<(), RosterError> {
            self.rows.lock().unwrap().remove(session_id);
            Ok(())
        }

        async fn delete_expired(&self, now: i64) -> Result<u64, RosterError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|_, r| r.expires_at > now);
            Ok((before - rows.len()) as u64)
        }
    }

    fn toni() -> Principal {
        Principal {
            username: "toni".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            authority: Authority::User,
        }
    }

    #[tokio::test]
    async fn started_session_resolves_to_user() {
        let store = Arc::new(MemorySessionStore::default());
        let svc = SessionService::new(store.clone());

        let id = svc.start(&toni()).await.unwrap();

        let user = svc.resolve(&id).await.unwrap().expect("live session");
        assert_eq!(user.username, "toni");
        assert_eq!(user.authority, Authority::User);
        let row = store.rows.lock().unwrap().get(&id).cloned().unwrap();
        assert!(row.expires_at > now());
        assert!(!format!("{row:?}").contains("hash"));
    }

    #[tokio::test]
    async fn session_ids_are_unique() {
        let svc = SessionService::new(Arc::new(MemorySessionStore::default()));
        let a = svc.start(&toni()).await.unwrap();
        let b = svc.start(&toni()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn ended_session_no_longer_resolves() {
        let svc = SessionService::new(Arc::new(MemorySessionStore::default()));
        let id = svc.start(&toni()).await.unwrap();

        svc.end(&id).await.unwrap();

        assert_eq!(svc.resolve(&id).await.unwrap(), None);
        // ending twice is harmless
        svc.end(&id).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_id_does_not_resolve() {
        let svc = SessionService::new(Arc::new(MemorySessionStore::default()));
        assert_eq!(svc.resolve("no-such-session").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_session_is_dropped_on_resolve() {
        let store = Arc::new(MemorySessionStore::default());
        let svc = SessionService::with_ttl(store.clone(), Duration::seconds(-1));
        let id = svc.start(&toni()).await.unwrap();

        assert_eq!(svc.resolve(&id).await.unwrap(), None);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let store = Arc::new(MemorySessionStore::default());
        let live = SessionService::new(store.clone());
        let stale = SessionService::with_ttl(store.clone(), Duration::seconds(-1));
        let kept = live.start(&toni()).await.unwrap();
        stale.start(&toni()).await.unwrap();

        assert_eq!(live.purge_expired().await.unwrap(), 1);
        assert!(live.resolve(&kept).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn corrupt_authority_is_an_error() {
        let store = Arc::new(MemorySessionStore::default());
        store
            .create(SessionRecord {
                session_id: "s1".to_string(),
                username: "toni".to_string(),
                authority: "ADMIN".to_string(),
                expires_at: now() + 60,
            })
            .await
            .unwrap();
        let svc = SessionService::new(store);

        assert!(matches!(
            svc.resolve("s1").await,
            Err(RosterError::UnknownAuthority(_))
        ));
    }
}
