use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::metrics_utils::setup_metrics_recorder;
use crate::router::router;
use crate::store::AggregationStore;

pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics = if config.enable_metrics {
        Some(setup_metrics_recorder().context("failed to install prometheus recorder")?)
    } else {
        None
    };

    let policy = config.policy();
    tracing::info!(?policy, "prediction policy configured");

    let app = router(Arc::new(AggregationStore::new()), policy, metrics);

    tracing::info!("listening on {:?}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("http server exited with an error")
}
