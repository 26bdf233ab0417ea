use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::{telemetry, Config, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env().context("reading configuration")?;
    let addr = config.listen_addr()?;

    tracing::info!(database_url = %config.database_url, "opening store");
    let store = TodoStore::connect(&config.database_url)
        .await
        .context("opening todo store")?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");
    todo_server::run(listener, store).await?;

    tracing::info!("shutting down");
    Ok(())
}
