//! DOI back-office API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p doi-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use doi_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(tracing_err) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {tracing_err}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_env(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting DOI back-office API server"
    );

    if let Err(e) = doi_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
