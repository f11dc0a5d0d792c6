use axum::{Router, middleware, routing::post};

use crate::middleware::auth::basic_auth;
use crate::state::AppState;

use super::controller::{refresh_token, sign_in, sign_up};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/sign/in", post(sign_in))
        .route("/sign/up", post(sign_up))
        .route_layer(middleware::from_fn_with_state(state, basic_auth));

    Router::new()
        .merge(guarded)
        .route("/refresh", post(refresh_token))
}
