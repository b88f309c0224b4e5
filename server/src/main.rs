use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use todos_server::{config::Config, docs, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init(&config.log_filter)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    let public_url = config.public_url();
    info!(%addr, "API running on {public_url}");
    info!("Docs at {public_url}{}", docs::DOCS_PATH);

    let app = todos_server::router(config.initial_store(), docs::openapi(&public_url));
    todos_server::run(listener, app).await?;
    info!("server stopped");
    Ok(())
}
