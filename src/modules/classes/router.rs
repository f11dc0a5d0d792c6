use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_teacher;
use crate::state::AppState;

use super::controller::{
    assign_students, create_class, delete_class, get_class, get_classes, unassign_students,
    update_class,
};

pub fn init_classes_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_classes).post(create_class))
        .route(
            "/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route(
            "/{id}/students",
            post(assign_students).delete(unassign_students),
        )
        .route_layer(middleware::from_fn_with_state(state, require_teacher))
}
