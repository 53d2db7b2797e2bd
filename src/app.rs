use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit_attendance", post(handlers::submit_attendance))
        .route("/add_employee", post(handlers::add_employee))
        .route("/delete_employee", post(handlers::delete_employee))
        .route("/api/attendance", get(handlers::get_attendance))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
