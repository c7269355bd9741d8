use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/garden", get(handlers::get_garden))
        .route("/api/habits", post(handlers::create_habit))
        .route("/api/habits/:id/complete", post(handlers::complete_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/habits/:id/complete", post(handlers::complete_habit_form))
        .route("/habits/:id/delete", post(handlers::delete_habit_form))
        .with_state(state)
}
