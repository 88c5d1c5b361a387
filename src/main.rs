use std::sync::Arc;

use k9server::config::Config;
use k9server::router::RouteTable;
use k9server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let table = Arc::new(RouteTable::from_config(&cfg));

    // Shutdown is non-graceful: dropping the accept future stops the server
    // without draining in-flight connections.
    tokio::select! {
        res = server::listener::run(&cfg, table) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
