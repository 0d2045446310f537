//! Market Configuration Module
//!
//! Network and invocation settings for the orchestration core, loaded from
//! TOML. Every timeout, poll interval and retry bound used by the pipeline
//! lives here rather than in code.

use market_core::{Address, NetworkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Passphrase of a local standalone network
pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";
/// Passphrase of the public test network
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
/// Passphrase of the public main network
pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Default inclusion fee, in stroops
pub const BASE_FEE: u32 = 100;
/// Default transaction validity window
pub const DEFAULT_TX_VALIDITY_SECS: u64 = 300;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Unknown contract `{0}`")]
    UnknownContract(String),
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Standalone,
    TestNet,
    MainNet,
}

impl NetworkType {
    /// Gets the network passphrase
    pub fn passphrase(&self) -> &'static str {
        match self {
            NetworkType::Standalone => STANDALONE_PASSPHRASE,
            NetworkType::TestNet => TESTNET_PASSPHRASE,
            NetworkType::MainNet => MAINNET_PASSPHRASE,
        }
    }

    /// Gets the default RPC endpoint
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            NetworkType::Standalone => "http://localhost:8000/rpc",
            NetworkType::TestNet => "https://soroban-testnet.stellar.org",
            NetworkType::MainNet => "https://mainnet.sorobanrpc.com",
        }
    }

    /// Name shown to users; a standalone network is shown as `Local`
    pub fn display_name(&self) -> &'static str {
        match self {
            NetworkType::Standalone => "Local",
            NetworkType::TestNet => "Testnet",
            NetworkType::MainNet => "Mainnet",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Standalone => write!(f, "standalone"),
            NetworkType::TestNet => write!(f, "testnet"),
            NetworkType::MainNet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standalone" | "local" => Ok(NetworkType::Standalone),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "mainnet" | "main" | "public" => Ok(NetworkType::MainNet),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub network: NetworkType,
    /// Overrides the passphrase derived from `network`
    pub passphrase: Option<String>,
    /// Overrides the RPC endpoint derived from `network`
    pub rpc_url: Option<String>,
    pub allow_http: bool,
    /// Prefix a transaction hash is appended to for an explorer link
    pub explorer_url: Option<String>,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            network: NetworkType::Standalone,
            passphrase: None,
            rpc_url: None,
            allow_http: true,
            explorer_url: None,
        }
    }
}

impl NetworkSettings {
    pub fn passphrase(&self) -> &str {
        self.passphrase
            .as_deref()
            .unwrap_or_else(|| self.network.passphrase())
    }

    pub fn network_id(&self) -> NetworkId {
        NetworkId::from_passphrase(self.passphrase())
    }

    pub fn rpc_url(&self) -> Result<Url> {
        let raw = self
            .rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url());
        let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
            field: "network.rpc_url",
            reason: format!("{}: {}", raw, e),
        })?;

        match url.scheme() {
            "https" => Ok(url),
            "http" if self.allow_http => Ok(url),
            "http" => Err(ConfigError::Invalid {
                field: "network.rpc_url",
                reason: "http endpoints require allow_http = true".to_string(),
            }),
            other => Err(ConfigError::Invalid {
                field: "network.rpc_url",
                reason: format!("unsupported scheme `{}`", other),
            }),
        }
    }

    /// Explorer link for a transaction hash, when an explorer is configured
    pub fn explorer_link(&self, tx_hash: &str) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|prefix| format!("{}/{}", prefix.trim_end_matches('/'), tx_hash))
    }
}

/// Invocation pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationSettings {
    pub base_fee: u32,
    pub tx_validity_secs: u64,
    pub simulation_timeout_ms: u64,
    pub signing_timeout_ms: u64,
    pub submission_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    /// Consecutive poll transport failures tolerated before giving up
    pub max_poll_retries: u32,
}

impl Default for InvocationSettings {
    fn default() -> Self {
        Self {
            base_fee: BASE_FEE,
            tx_validity_secs: DEFAULT_TX_VALIDITY_SECS,
            simulation_timeout_ms: 30_000,
            signing_timeout_ms: 300_000,
            submission_timeout_ms: 30_000,
            poll_interval_ms: 1_000,
            max_poll_attempts: 30,
            max_poll_retries: 3,
        }
    }
}

impl InvocationSettings {
    pub fn simulation_timeout(&self) -> Duration {
        Duration::from_millis(self.simulation_timeout_ms)
    }

    pub fn signing_timeout(&self) -> Duration {
        Duration::from_millis(self.signing_timeout_ms)
    }

    pub fn submission_timeout(&self) -> Duration {
        Duration::from_millis(self.submission_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn tx_validity(&self) -> Duration {
        Duration::from_secs(self.tx_validity_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let non_zero = [
            ("invocation.simulation_timeout_ms", self.simulation_timeout_ms),
            ("invocation.signing_timeout_ms", self.signing_timeout_ms),
            ("invocation.submission_timeout_ms", self.submission_timeout_ms),
            ("invocation.poll_interval_ms", self.poll_interval_ms),
            ("invocation.max_poll_attempts", self.max_poll_attempts as u64),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Complete settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub network: NetworkSettings,
    pub invocation: InvocationSettings,
    /// Named contract ids
    pub contracts: BTreeMap<String, String>,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.network.rpc_url()?;
        self.invocation.validate()?;
        for name in self.contracts.keys() {
            self.contract(name)?;
        }
        Ok(())
    }

    /// Resolves a named contract id
    pub fn contract(&self, name: &str) -> Result<Address> {
        let raw = self
            .contracts
            .get(name)
            .ok_or_else(|| ConfigError::UnknownContract(name.to_string()))?;
        let address = Address::parse(raw).map_err(|e| ConfigError::Invalid {
            field: "contracts",
            reason: format!("{}: {}", name, e),
        })?;
        if !address.is_contract() {
            return Err(ConfigError::Invalid {
                field: "contracts",
                reason: format!("{} is not a contract address", name),
            });
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.network.passphrase(), STANDALONE_PASSPHRASE);
        assert_eq!(settings.invocation.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn network_type_parses_aliases() {
        assert_eq!("local".parse::<NetworkType>().unwrap(), NetworkType::Standalone);
        assert_eq!("TestNet".parse::<NetworkType>().unwrap(), NetworkType::TestNet);
        assert!("moon".parse::<NetworkType>().is_err());
        assert_eq!(NetworkType::Standalone.display_name(), "Local");
    }

    #[test]
    fn http_requires_allow_http() {
        let settings = NetworkSettings {
            rpc_url: Some("http://localhost:8000/rpc".to_string()),
            allow_http: false,
            ..NetworkSettings::default()
        };
        assert!(matches!(
            settings.rpc_url(),
            Err(ConfigError::Invalid { field: "network.rpc_url", .. })
        ));
    }

    #[test]
    fn explorer_link_joins_hash() {
        let settings = NetworkSettings {
            explorer_url: Some("https://stellar.expert/explorer/testnet/tx/".to_string()),
            ..NetworkSettings::default()
        };
        assert_eq!(
            settings.explorer_link("7f3a").as_deref(),
            Some("https://stellar.expert/explorer/testnet/tx/7f3a")
        );
        assert!(NetworkSettings::default().explorer_link("7f3a").is_none());
    }
}
