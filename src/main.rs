//! cexdeck - Terminal admin console for CloudExchange instances
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use clap::Parser;
use cexdeck_app::config::{self, CliOverrides};
use cexdeck_core::prelude::*;

/// cexdeck - Terminal admin console for CloudExchange instances
#[derive(Parser, Debug)]
#[command(name = "cexdeck")]
#[command(about = "Manage CloudExchange plugins, tenants and credentials", long_about = None)]
struct Args {
    /// Backend gateway base URL (overrides CEXDECK_API_BASE_URL and the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// CloudExchange address to prefill in the connect form
    #[arg(long, value_name = "HOST")]
    address: Option<String>,

    /// Default the connect form to plain HTTP
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Log to file, the TUI owns the terminal
    cexdeck_core::logging::init()?;

    let overrides = CliOverrides {
        base_url: args.base_url,
        address: args.address,
        insecure: args.insecure,
    };
    let settings = config::resolve_settings(config::load_settings(), &overrides)?;
    info!("Gateway base URL: {}", settings.api.base_url);

    let result = cexdeck_tui::run(settings).await;
    match result {
        Err(ref e) if e.is_fatal() => error!("cexdeck could not start: {}", e),
        Err(ref e) => error!("Application error: {:?}", e),
        Ok(()) => {}
    }
    result
}
