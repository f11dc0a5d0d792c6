use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::{require_student, require_teacher};
use crate::state::AppState;

use super::controller::{create_transaction, get_transaction, get_transactions};

pub fn init_transactions_router(state: AppState) -> Router<AppState> {
    let teacher_routes = Router::new()
        .route("/", get(get_transactions))
        .route("/{id}", get(get_transaction))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    let student_routes = Router::new()
        .route("/", post(create_transaction))
        .route_layer(middleware::from_fn_with_state(state, require_student));

    Router::new().merge(teacher_routes).merge(student_routes)
}
