use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,market=info,market_invocation=info";

/// Installs the global subscriber writing to stderr. `RUST_LOG` overrides the
/// default filter. Fails if a subscriber is already installed.
pub fn init(json: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
