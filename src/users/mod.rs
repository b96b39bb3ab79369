mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

#[cfg(test)]
pub mod fake;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgUserStore, UserStore};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}
