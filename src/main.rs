//! Healthcheck binary for the forwarding-proxy container.
//!
//! Exit code 0 means every enabled check passed; 1 means a check (or the
//! configuration) failed, with the reason logged to stderr for the
//! supervisor's benefit.

use clap::Parser;

use proxy_healthcheck::config::CheckConfig;
use proxy_healthcheck::{observability, runner};

#[derive(Parser)]
#[command(name = "healthcheck", version)]
#[command(about = "Healthcheck for the TCP/UDP forwarding proxy", long_about = None)]
struct Cli {
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() {
    observability::logging::init();
    let cli = Cli::parse();

    let config = match CheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if cli.show_config {
        match serde_json::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to render configuration");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(failure) = runner::run(&config).await {
        tracing::error!(error = %failure, "healthcheck failed");
        std::process::exit(1);
    }

    tracing::debug!("all enabled checks passed");
}
