//! Command-line arguments.

use clap::{Parser, Subcommand};
use market_config::NetworkType;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "market-cli",
    version,
    about = "Claim rewards, create collections and tokens on the marketplace contracts"
)]
pub struct CliArgs {
    /// Path to the TOML settings file
    #[arg(short, long, value_name = "PATH", env = "MARKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overrides the configured network
    #[arg(long, value_name = "NETWORK")]
    pub network: Option<NetworkType>,

    /// Overrides the configured RPC endpoint
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Hex-encoded secret key of the signing account
    #[arg(long, value_name = "HEX", env = "MARKET_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Ask for confirmation before every signature
    #[arg(short, long)]
    pub interactive: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Invoke any method of a registered contract
    Invoke {
        /// Contract id, or a name from the `[contracts]` table
        #[arg(long)]
        contract: String,

        #[arg(long)]
        method: String,

        /// Argument as `name=value`; values are parsed as JSON when possible
        #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_arg)]
        args: Vec<(String, Value)>,
    },

    /// Claim the reward NFT
    Claim {
        /// Reward contract id or name
        #[arg(long, default_value = "dj_nft")]
        contract: String,
    },

    /// Create an NFT collection through the factory
    CreateCollection {
        #[arg(long)]
        name: String,

        #[arg(long)]
        symbol: String,

        #[arg(long)]
        base_uri: String,
    },

    /// Create a fungible token through the factory
    CreateToken {
        #[arg(long)]
        name: String,

        #[arg(long)]
        symbol: String,

        #[arg(long, default_value_t = 7)]
        decimals: u32,
    },

    /// Deploy the asset contract for a classic asset issued by the signer
    DeployAsset {
        /// Asset code, 1 to 12 letters or digits
        #[arg(long)]
        code: String,
    },
}

/// Parses `name=value`. The value is read as JSON, falling back to a plain
/// string.
pub fn parse_arg(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing argument name in `{}`", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
