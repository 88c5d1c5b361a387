use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::RouteTable;

/// Binds the configured address and serves until the future is dropped.
pub async fn run(cfg: &Config, table: Arc<RouteTable>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    serve(
        listener,
        table,
        cfg.workers,
        Duration::from_secs(cfg.read_timeout_secs),
    )
    .await
}

/// Accept loop decoupled from a bounded worker pool. A permit is acquired
/// before each accept, so a saturated pool stalls accepting and new
/// connections queue in the kernel backlog rather than piling up in memory.
pub async fn serve(
    listener: TcpListener,
    table: Arc<RouteTable>,
    workers: usize,
    read_timeout: Duration,
) -> anyhow::Result<()> {
    let pool = Arc::new(Semaphore::new(workers));

    loop {
        let permit = pool.clone().acquire_owned().await?;
        let (socket, peer) = listener.accept().await?;
        debug!(%peer, "accepted connection");

        let table = table.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, table, read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!(%peer, error = %e, "connection error");
            }
            debug!(%peer, "closing connection");
            drop(permit);
        });
    }
}
