use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use geo_rest_configuration::{ConnectionSettings, PoolSettings};

#[derive(Debug, Parser)]
#[command(version, about)]
struct ServerOptions {
    /// The port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8100)]
    port: u16,
    #[command(flatten)]
    connection: ConnectionSettings,
    #[command(flatten)]
    pool: PoolSettings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server_options = ServerOptions::parse();
    tracing::debug!(options = ?server_options);

    let state = geo_rest::create_state(
        server_options.connection,
        server_options.pool,
        prometheus::Registry::new(),
    )
    .await?;
    let router = geo_rest::create_router(state);

    let address = SocketAddr::from(([0, 0, 0, 0], server_options.port));
    tracing::info!("Starting server on {}", address);

    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
