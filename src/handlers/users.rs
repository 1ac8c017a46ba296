use axum::{extract::State, Form, Json};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{CreateUser, User};
use crate::repositories::UserRepository;

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
}

#[derive(Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

pub async fn create_user(
    State(state): State<UsersState>,
    Form(form): Form<CreateUser>,
) -> Result<Json<UserResponse>> {
    let username = form
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("username is required".to_string()))?;

    let user = state.user_repo.create(username).await?;

    tracing::debug!("Created user '{}' ({})", user.username, user.id);

    Ok(Json(user.into()))
}

pub async fn list_users(State(state): State<UsersState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.user_repo.find_all().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
