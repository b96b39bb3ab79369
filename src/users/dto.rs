use serde::{Deserialize, Serialize};

/// Body of `POST /users` and `PUT /users/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: i64,
}
