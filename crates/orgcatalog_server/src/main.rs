#![forbid(unsafe_code)]

use clap::Parser;
use log::{info, warn};
use orgcatalog_core::{init_logging, open_db, seed_catalog, SeedOutcome};
use orgcatalog_server::{build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir, true)?;
    }

    let mut conn = open_db(&config.db_path)?;
    if config.seed {
        if let SeedOutcome::Seeded(counts) = seed_catalog(&mut conn)? {
            eprintln!(
                "orgcatalog_server seeded {} buildings and {} organizations",
                counts.buildings, counts.organizations
            );
        }
    }

    let app = build_router(AppState::new(conn, config.api_key.as_str()));
    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    info!(
        "event=server_start module=server status=ok bind={} db_path={}",
        config.bind,
        config.db_path.display()
    );
    eprintln!("orgcatalog_server listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
