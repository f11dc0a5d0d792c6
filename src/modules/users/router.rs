use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::auth::basic_auth;
use crate::middleware::role::{require_student, require_teacher};
use crate::state::AppState;

use super::controller::{
    delete_users, get_profile, get_users, request_password_reset, reset_password, update_profile,
};

pub fn init_users_router(state: AppState) -> Router<AppState> {
    let teacher_routes = Router::new()
        .route("/", get(get_users).delete(delete_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    let student_routes = Router::new()
        .route("/", patch(update_profile))
        .route("/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_student,
        ));

    let reset_routes = Router::new()
        .route("/profile/reset/request", post(request_password_reset))
        .route("/profile/reset", patch(reset_password))
        .route_layer(middleware::from_fn_with_state(state, basic_auth));

    Router::new()
        .merge(teacher_routes)
        .merge(student_routes)
        .merge(reset_routes)
}
