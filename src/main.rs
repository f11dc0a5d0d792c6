use std::net::SocketAddr;

use dotenvy::dotenv;

use studyhall::logging::init_tracing;
use studyhall::middleware::rate_limit::spawn_limiter_housekeeping;
use studyhall::router::init_router;
use studyhall::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = init_tracing()?;

    let state = init_app_state().map_err(|err| anyhow::anyhow!(err.message))?;
    spawn_limiter_housekeeping(
        state.rate_limiter.clone(),
        std::time::Duration::from_secs(state.rate_limit_config.window_secs.max(1)),
    );
    let addr = SocketAddr::from(([0, 0, 0, 0], state.server_config.port));
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", addr.port());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
