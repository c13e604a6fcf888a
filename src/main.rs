//! RFM Choice Service (v1)
//!
//! Serves precomputed RFM customer segments and records each customer's
//! chosen retention incentive.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────────────────┐
//!                  │                    CHOICE SERVICE                       │
//!                  │                                                         │
//!  Client Request  │  ┌─────────┐    ┌──────────┐    ┌──────────────────┐   │
//!  ────────────────┼─▶│  http   │───▶│ handlers │───▶│ segments (rules) │   │
//!                  │  │ server  │    └────┬─────┘    └──────────────────┘   │
//!                  │  └─────────┘         │                                  │
//!                  │                      ▼                                  │
//!                  │        ┌──────────────────┐   ┌──────────────────┐     │
//!                  │        │ dataset (index)  │   │ choices (log)    │     │
//!                  │        │  df_ui.csv (ro)  │   │ choice_log.csv   │     │
//!                  │        └──────────────────┘   └──────────────────┘     │
//!                  │                                                         │
//!                  │  ┌───────────────────────────────────────────────────┐ │
//!                  │  │ config │ observability │ lifecycle (start/stop)   │ │
//!                  │  └───────────────────────────────────────────────────┘ │
//!                  └────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use rfm_choice_service::http::HttpServer;
use rfm_choice_service::lifecycle::{startup, Shutdown};
use rfm_choice_service::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "rfm-choice-service")]
#[command(about = "Serves RFM customer segments and records retention choices", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging depends on config, so config errors go straight to stderr.
    let config = startup::load_config(args.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!("rfm-choice-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        customers = %config.data.customers_path().display(),
        choice_log = %config.data.choice_log_path().display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if let Err(e) = startup::start_metrics(&config.observability) {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    let state = match startup::prepare_state(&config.data) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = startup::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, state);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
