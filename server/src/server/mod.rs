pub mod api;
pub mod router;

use std::future::Future;

use anyhow::Result;

use crate::config::AppConfig;

/// Start the axum HTTP server and run until `shutdown` resolves.
pub async fn start_server(
    config: AppConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = router::create_router(&config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Image cropper listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
