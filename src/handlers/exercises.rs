use axum::{
    extract::{Path, Query, State},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::exercise::parse_date;
use crate::models::{CreateExercise, LogFilter, User};
use crate::repositories::{ExerciseRepository, UserRepository};

#[derive(Clone)]
pub struct ExercisesState {
    pub user_repo: UserRepository,
    pub exercise_repo: ExerciseRepository,
}

#[derive(Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

pub async fn add_exercise(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
    Form(form): Form<CreateExercise>,
) -> Result<Json<ExerciseResponse>> {
    let user = find_user(&state, &id).await?;

    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("description is required".to_string()))?;

    let duration: i64 = form
        .duration
        .as_deref()
        .ok_or_else(|| AppError::Validation("duration is required".to_string()))?
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("duration must be a number of minutes".to_string()))?;

    // Submitted dates must be ISO; an omitted date means today.
    let date = match form.date.as_deref() {
        Some(s) => parse_date(s)
            .ok_or_else(|| AppError::Validation("date must be in YYYY-MM-DD format".to_string()))?,
        None => Utc::now().date_naive(),
    };

    let record = state
        .exercise_repo
        .create(&user.id, description, duration, date)
        .await?;

    tracing::debug!("Logged exercise '{}' for user {}", record.description, user.id);

    let date = record.date_string();
    Ok(Json(ExerciseResponse {
        id: user.id,
        username: user.username,
        description: record.description,
        duration: record.duration,
        date,
    }))
}

pub async fn get_log(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<LogResponse>> {
    let user = find_user(&state, &id).await?;

    let records = state.exercise_repo.find_by_user(&user.id).await?;

    let filter = LogFilter::from_query(
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit.as_deref(),
    );

    let log: Vec<LogEntry> = filter
        .apply(records)
        .into_iter()
        .map(|r| LogEntry {
            date: r.date_string(),
            description: r.description,
            duration: r.duration,
        })
        .collect();

    Ok(Json(LogResponse {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    }))
}

async fn find_user(state: &ExercisesState, id: &str) -> Result<User> {
    state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}
