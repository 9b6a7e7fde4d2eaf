use std::{net::SocketAddr, sync::Arc};

use partysync::{
    common::{
        banner::{BuildInfo, print_banner},
        logger,
        types::AnyResult,
    },
    configs::Config,
    rest,
    server::AppState,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> AnyResult<()> {
    print_banner(&BuildInfo::default());

    let config = Config::load()?;
    logger::init(&config);

    let address: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(
        "End-of-song policy: {}, seeded parties: {:?}",
        config.player.end_of_song.as_str(),
        config.parties.seed
    );

    let shared_state = Arc::new(AppState::new(config));
    let app = rest::app(shared_state);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Party player listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
