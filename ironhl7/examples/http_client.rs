//! HTTP client example.
//!
//! Talks to a running `hl7-server`: checks health, fetches the sample
//! message and submits it back to `/parse`.
//!
//! ```text
//! cargo run --bin hl7-server
//! cargo run --example http_client
//! ```

use ironhl7::prelude::*;
use std::time::Duration;
use tracing::{error, info};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

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

    let addr = std::env::var("HL7_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let client = Client::new(addr.as_str()).with_timeout(Duration::from_secs(5));
    info!("Connecting to HL7 server at {}", addr);

    let health = client.sample_message("/health").await?;
    info!("Health: {}", health.message);

    let generated = client.sample_message("/generate").await?;
    let Some(msg) = generated.data else {
        error!("Server returned no sample message: {}", generated.message);
        return Ok(());
    };
    info!("Generated message with {} segments", msg.len());

    let parsed = client.send_message("/parse", &msg).await?;
    info!("Parse: success={} message={}", parsed.success, parsed.message);
    if parsed.data.as_ref() == Some(&msg) {
        info!("Server parsed the message back unchanged");
    }

    Ok(())
}
