mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use reelshelf_api::auth::CredentialStore;
use reelshelf_api::session::SessionController;
use reelshelf_api::videos::VideoCatalog;
use reelshelf_api::{AppStateInner, router};
use reelshelf_db::Database;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "reelshelf_server=debug,reelshelf_api=debug,reelshelf_db=info,tower_http=debug".into()
            }),
        )
        .init();

    // Init store
    let db = Arc::new(
        Database::open(&config.db_path)
            .with_context(|| format!("cannot open store at {}", config.db_path.display()))?,
    );

    let controller = SessionController::new(
        CredentialStore::new(db.clone()),
        VideoCatalog::new(db.clone()),
    );
    let state = Arc::new(AppStateInner::new(controller));

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Video manager listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and every handle it held are gone once serve returns.
    match Arc::try_unwrap(db) {
        Ok(db) => db.close()?,
        Err(_) => warn!("Store still referenced at shutdown; leaving it to drop"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
