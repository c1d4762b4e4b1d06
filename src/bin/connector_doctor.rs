//! Serves the connector diagnostics tools over MCP stdio.
//!
//! Usage:
//!
//! ```text
//! FIVETRAN_API_KEY=... FIVETRAN_API_SECRET=... connector-doctor
//! ```
//!
//! Settings are read from flags, environment variables, or a `.env` file in
//! the working directory. Logs go to stderr.

use clap::Parser;
use connector_doctor::{
    config::{
        DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DoctorConfig, DoctorConfigInput,
    },
    inventory::{adapters::HttpPlatformFetcher, domain::DiagnosisPolicy, ports::PlatformFetcher},
    logging,
    tools::DoctorServer,
};
use eyre::WrapErr;
use rmcp::ServiceExt;
use std::sync::Arc;
use tracing::info;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "connector-doctor", version, about)]
struct Args {
    /// Fivetran API key.
    #[arg(long, env = "FIVETRAN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Fivetran API secret.
    #[arg(long, env = "FIVETRAN_API_SECRET", hide_env_values = true)]
    api_secret: Option<String>,

    /// Fivetran API root.
    #[arg(long, env = "FIVETRAN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CONNECTOR_DOCTOR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Page size for list endpoints.
    #[arg(long, env = "CONNECTOR_DOCTOR_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Hours without a successful sync before a connector is stale.
    #[arg(
        long,
        env = "CONNECTOR_DOCTOR_STALE_SYNC_HOURS",
        default_value_t = DiagnosisPolicy::DEFAULT_STALE_SYNC_HOURS
    )]
    stale_sync_hours: u32,

    /// Hours within which a failure counts as recent.
    #[arg(
        long,
        env = "CONNECTOR_DOCTOR_RECENT_FAILURE_HOURS",
        default_value_t = DiagnosisPolicy::DEFAULT_RECENT_FAILURE_HOURS
    )]
    recent_failure_hours: u32,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, env = "CONNECTOR_DOCTOR_LOG", default_value = "info")]
    log: String,
}

impl From<Args> for DoctorConfigInput {
    fn from(args: Args) -> Self {
        Self {
            api_key: args.api_key,
            api_secret: args.api_secret,
            base_url: args.base_url,
            timeout_secs: args.timeout_secs,
            page_size: args.page_size,
            stale_sync_hours: args.stale_sync_hours,
            recent_failure_hours: args.recent_failure_hours,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logging::init(&args.log);

    let config = DoctorConfig::from_input(args.into()).wrap_err("invalid configuration")?;
    let fetcher: Arc<dyn PlatformFetcher> = Arc::new(
        HttpPlatformFetcher::new(config.fetcher_settings())
            .wrap_err("failed to build HTTP client")?,
    );
    info!(base_url = config.base_url(), "starting connector doctor");

    let server = DoctorServer::new(fetcher, config.policy())
        .serve(rmcp::transport::stdio())
        .await
        .wrap_err("failed to start MCP server")?;
    server.waiting().await.wrap_err("MCP server stopped")?;
    Ok(())
}
