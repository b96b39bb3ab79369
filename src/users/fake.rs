use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::users::{
    dto::UserPayload,
    repo::UserStore,
    repo_types::{User, UserSummary},
};

#[derive(Debug, Clone)]
struct Row {
    user: User,
    deleted_at: Option<OffsetDateTime>,
}

/// In-memory stand-in for `PgUserStore`, mirroring its soft-delete filtering.
#[derive(Default)]
pub struct FakeUserStore {
    rows: Mutex<Vec<Row>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeUserStore {
    /// Every call fails as if the pool could not hand out a connection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of statements issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total rows, soft-deleted included.
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn deleted_at(&self, id: i64) -> Option<OffsetDateTime> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.id == id)
            .and_then(|r| r.deleted_at)
    }

    fn begin(&self) -> Result<(), sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        self.begin()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.deleted_at.is_none())
            .map(|r| r.user.clone())
            .collect())
    }

    async fn create(&self, payload: &UserPayload) -> Result<User, sqlx::Error> {
        self.begin()?;
        let mut rows = self.rows.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: rows.len() as i64 + 1,
            username: payload.username.clone(),
            email: payload.email.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(Row {
            user: user.clone(),
            deleted_at: None,
        });
        Ok(user)
    }

    async fn find(&self, id: i64) -> Result<Option<UserSummary>, sqlx::Error> {
        self.begin()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.user.id == id && r.deleted_at.is_none())
            .map(|r| UserSummary {
                id: r.user.id,
                username: r.user.username.clone(),
                email: r.user.email.clone(),
            }))
    }

    async fn update(&self, id: i64, payload: &UserPayload) -> Result<u64, sqlx::Error> {
        self.begin()?;
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|r| r.user.id == id && r.deleted_at.is_none())
        {
            Some(row) => {
                row.user.username = payload.username.clone();
                row.user.email = payload.email.clone();
                row.user.updated_at = OffsetDateTime::now_utc();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn soft_delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        self.begin()?;
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|r| r.user.id == id && r.deleted_at.is_none())
        {
            Some(row) => {
                let now = OffsetDateTime::now_utc();
                row.deleted_at = Some(now);
                row.user.updated_at = now;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.begin()
    }
}
