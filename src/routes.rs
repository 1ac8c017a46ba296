use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{exercises, health, users};

pub fn create_router(
    users_state: users::UsersState,
    exercises_state: exercises::ExercisesState,
) -> Router {
    Router::new()
        // User directory
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .with_state(users_state)
        // Exercise log
        .route("/api/users/{id}/exercises", post(exercises::add_exercise))
        .route("/api/users/{id}/logs", get(exercises::get_log))
        .with_state(exercises_state)
        // Health
        .route("/api/health", get(health::health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
