use std::{sync::Arc, time::Duration};

use clap::Parser;
use memohttp::{app::Application, cli, server::Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Gives in-flight response writes a moment to drain after the final flush.
const SHUTDOWN_LINGER: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app = Arc::new(Application::new(
        &args.fib_history,
        &args.fact_history,
        &args.fact_big_history,
    ));

    // A cache file that cannot be opened or read is fatal before serving;
    // an absent one is created empty.
    app.restore().await?;

    let server = Server::bind(&args.addr, app.clone()).await?;
    server.serve().await?;

    info!("shutting down, flushing caches");
    let flushed = app.flush().await;
    info!(entries = flushed, "flush complete");

    tokio::time::sleep(SHUTDOWN_LINGER).await;

    Ok(())
}
