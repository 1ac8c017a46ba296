use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;

use fitlog::db::{create_memory_pool, DbPool};
use fitlog::handlers::{exercises, users};
use fitlog::migrations::run_migrations_for_tests;
use fitlog::models::{ExerciseRecord, User};
use fitlog::repositories::{ExerciseRepository, UserRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let user_repo = UserRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());

    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        user_repo,
        exercise_repo,
    };

    fitlog::routes::create_router(users_state, exercises_state)
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &DbPool, username: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo.create(username).await.unwrap()
}

#[allow(dead_code)]
pub async fn create_test_exercise(
    pool: &DbPool,
    user_id: &str,
    description: &str,
    duration: i64,
    date: NaiveDate,
) -> ExerciseRecord {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    exercise_repo
        .create(user_id, description, duration, date)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("response body was not valid JSON")
}
