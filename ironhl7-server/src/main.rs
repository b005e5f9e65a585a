/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HL7 processing service.
//!
//! Listens on `HL7_HOST:HL7_PORT` (default `0.0.0.0:8080`) until Ctrl-C.

use anyhow::Context;
use ironhl7_server::{BuildInfo, Server, ServerConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let build_info = BuildInfo::from_build_env();
    info!(
        "HL7 Processor v{} (Built: {})",
        build_info.version(),
        build_info.build_date()
    );

    let config = ServerConfig::from_env().with_build_info(build_info);
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    Server::new(config)
        .serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
