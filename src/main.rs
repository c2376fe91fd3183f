mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    error::{internal::InternalError, AppError},
    router, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let email_sender = startup::build_email_sender(&config);

    let bind_address = config.bind_address.clone();
    let state = AppState::new(db, config, email_sender);
    let app = router::router(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(InternalError::from)?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InternalError::from)?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
