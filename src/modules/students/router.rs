use axum::{Router, middleware, routing::get};

use crate::middleware::role::require_teacher;
use crate::state::AppState;

use super::controller::{get_student, get_students};

pub fn init_students_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_students))
        .route("/{id}", get(get_student))
        .route_layer(middleware::from_fn_with_state(state, require_teacher))
}
