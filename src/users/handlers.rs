use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    extractors::{JsonBody, UserId},
    state::AppState,
    users::{
        dto::{UpdatedResponse, UserPayload},
        repo_types::{User, UserSummary},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await.map_err(|e| {
        error!(error = %e, "list users failed");
        ApiError::from(e)
    })?;
    Ok(Json(users))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<User>), ApiError> {
    let user = match state.users.create(&payload).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(e.into());
        }
    };

    info!(user_id = user.id, username = %user.username, "user created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/users/{}", user.id))],
        Json(user),
    ))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<UserSummary>, ApiError> {
    match state.users.find(id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => {
            warn!(user_id = id, "user not found");
            Err(ApiError::NotFound { id })
        }
        Err(e) => {
            error!(error = %e, user_id = id, "get user failed");
            Err(e.into())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let affected = state.users.update(id, &payload).await.map_err(|e| {
        error!(error = %e, user_id = id, "update user failed");
        ApiError::from(e)
    })?;

    if affected == 0 {
        warn!(user_id = id, "update matched no live user");
        return Err(ApiError::NotFound { id });
    }

    info!(user_id = id, "user updated");
    Ok(Json(UpdatedResponse { updated: id }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    let affected = state.users.soft_delete(id).await.map_err(|e| {
        error!(error = %e, user_id = id, "delete user failed");
        ApiError::from(e)
    })?;

    if affected == 0 {
        warn!(user_id = id, "delete matched no live user");
        return Err(ApiError::NotFound { id });
    }

    info!(user_id = id, "user soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}
