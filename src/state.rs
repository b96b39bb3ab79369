use std::sync::Arc;

use sqlx::PgPool;

use crate::users::{PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub fn from_pool(db: PgPool) -> Self {
        Self::new(Arc::new(PgUserStore::new(db)))
    }
}
