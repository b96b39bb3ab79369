use axum::{
    async_trait,
    extract::{
        rejection::JsonRejection,
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use tracing::warn;

use crate::error::ApiError;

/// JSON request body. Any rejection (bad syntax, wrong content type, missing
/// or mistyped field) becomes a 400 before the handler runs.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(error = %rejection, "rejected request body");
                Err(ApiError::Validation(rejection.body_text()))
            }
        }
    }
}

/// `:id` path segment coerced to the table's integer key.
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                warn!(error = %rejection, "rejected user id");
                Err(ApiError::Validation(format!("invalid user id: {}", rejection.body_text())))
            }
        }
    }
}
