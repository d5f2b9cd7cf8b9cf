//! Runnable mathchat server.
//!
//! ```text
//! MATHCHAT_ADDR=0.0.0.0:8000 cargo run -p mathchat-server
//! nc localhost 8000
//! ```
//!
//! Environment:
//! - `MATHCHAT_ADDR`: listen address (default `localhost:8000`)
//! - `MATHCHAT_TRANSPORT`: `tcp` (default) or `websocket`
//! - `RUST_LOG`: log filter (default `info`)

use mathchat::prelude::*;

const DEFAULT_ADDR: &str = "localhost:8000";

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let addr = std::env::var("MATHCHAT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let transport = std::env::var("MATHCHAT_TRANSPORT").unwrap_or_default();
    let builder = MathchatServer::builder().bind(&addr);

    match transport.as_str() {
        "websocket" | "ws" => {
            let server = builder.build_websocket().await?;
            tracing::info!(addr = %server.local_addr()?, "listening (websocket)");
            server.run_until(shutdown_signal()).await?;
        }
        _ => {
            let server = builder.build().await?;
            tracing::info!(addr = %server.local_addr()?, "listening (tcp)");
            server.run_until(shutdown_signal()).await?;
        }
    }

    Ok(())
}
