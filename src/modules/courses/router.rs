use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_teacher;
use crate::state::AppState;

use super::controller::{
    create_course, get_course, get_courses, update_course, upload_course_video,
};

pub fn init_courses_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses).post(create_course))
        .route("/{id}", get(get_course).put(update_course))
        .route("/{id}/video", post(upload_course_video))
        .route_layer(middleware::from_fn_with_state(state, require_teacher))
}
