//! Settings file loading tests

use market_config::{ConfigError, NetworkType, Settings, TESTNET_PASSPHRASE};
use market_core::Address;
use std::io::Write;
use std::time::Duration;

#[test]
fn loads_full_settings_file() {
    let factory = Address::contract([3u8; 32]);
    let content = format!(
        r#"
[network]
network = "testnet"
rpc_url = "https://rpc.example.org"
allow_http = false
explorer_url = "https://stellar.expert/explorer/testnet/tx"

[invocation]
base_fee = 200
signing_timeout_ms = 60000
poll_interval_ms = 500
max_poll_attempts = 10
max_poll_retries = 2

[contracts]
factory = "{}"
"#,
        factory
    );

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.network.network, NetworkType::TestNet);
    assert_eq!(settings.network.passphrase(), TESTNET_PASSPHRASE);
    assert_eq!(settings.network.rpc_url().unwrap().as_str(), "https://rpc.example.org/");
    assert_eq!(settings.invocation.base_fee, 200);
    assert_eq!(settings.invocation.signing_timeout(), Duration::from_secs(60));
    assert_eq!(settings.invocation.poll_interval(), Duration::from_millis(500));
    assert_eq!(settings.invocation.max_poll_retries, 2);
    // unspecified fields keep their defaults
    assert_eq!(settings.invocation.submission_timeout(), Duration::from_secs(30));
    assert_eq!(settings.contract("factory").unwrap(), factory);
}

#[test]
fn rejects_zero_poll_attempts() {
    let err = Settings::from_toml_str("[invocation]\nmax_poll_attempts = 0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "invocation.max_poll_attempts",
            ..
        }
    ));
}

#[test]
fn rejects_account_as_contract_id() {
    let account = Address::account([1u8; 32]);
    let content = format!("[contracts]\nfactory = \"{}\"\n", account);
    assert!(matches!(
        Settings::from_toml_str(&content),
        Err(ConfigError::Invalid { field: "contracts", .. })
    ));
}

#[test]
fn unknown_contract_name() {
    let settings = Settings::default();
    assert!(matches!(
        settings.contract("dj_nft"),
        Err(ConfigError::UnknownContract(name)) if name == "dj_nft"
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = Settings::load("/nonexistent/market.toml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/market.toml"));
}
