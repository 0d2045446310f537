use clap::Parser;
use market_cli::args::parse_arg;
use market_cli::commands::{load_settings, registry, resolve_contract};
use market_cli::{CliArgs, Command};
use market_config::NetworkType;
use market_core::Address;
use serde_json::json;
use std::io::Write;

const FACTORY: [u8; 32] = [3; 32];

#[test]
fn parses_claim_with_default_contract() {
    let args = CliArgs::try_parse_from(["market-cli", "claim"]).unwrap();
    assert_eq!(
        args.command,
        Command::Claim {
            contract: "dj_nft".into()
        }
    );
    assert!(!args.interactive);
    assert_eq!(args.network, None);
}

#[test]
fn parses_invoke_arguments_as_json() {
    let args = CliArgs::try_parse_from([
        "market-cli",
        "--network",
        "testnet",
        "invoke",
        "--contract",
        "factory",
        "--method",
        "create_fungible",
        "--arg",
        "decimals=7",
        "--arg",
        "name=Night Drops",
    ])
    .unwrap();

    assert_eq!(args.network, Some(NetworkType::TestNet));
    match args.command {
        Command::Invoke { method, args, .. } => {
            assert_eq!(method, "create_fungible");
            assert_eq!(
                args,
                vec![
                    ("decimals".to_string(), json!(7)),
                    ("name".to_string(), json!("Night Drops")),
                ]
            );
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn create_token_defaults_decimals() {
    let args = CliArgs::try_parse_from([
        "market-cli",
        "create-token",
        "--name",
        "Drop",
        "--symbol",
        "drp",
    ])
    .unwrap();
    assert!(matches!(args.command, Command::CreateToken { decimals: 7, .. }));
}

#[test]
fn rejects_argument_without_name() {
    assert!(parse_arg("=5").is_err());
    assert!(parse_arg("novalue").is_err());
    assert_eq!(parse_arg("flag=true").unwrap(), ("flag".to_string(), json!(true)));
}

#[test]
fn settings_file_and_overrides_build_registry() {
    let factory = Address::contract(FACTORY);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[network]\nnetwork = \"testnet\"\n\n[contracts]\nfactory = \"{}\"\nunknown = \"{}\"\n",
        factory,
        Address::contract([4; 32])
    )
    .unwrap();

    let args = CliArgs::try_parse_from([
        "market-cli",
        "--config",
        file.path().to_str().unwrap(),
        "--rpc-url",
        "http://localhost:8000/rpc",
        "deploy-asset",
        "--code",
        "USD",
    ])
    .unwrap();

    let settings = load_settings(&args).unwrap();
    assert_eq!(settings.network.network, NetworkType::TestNet);
    assert_eq!(settings.network.rpc_url().unwrap().as_str(), "http://localhost:8000/rpc");

    let registry = registry(&settings).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.resolve(&factory, "deploy_sac").is_ok());

    assert_eq!(resolve_contract(&settings, "factory").unwrap(), factory);
    assert_eq!(
        resolve_contract(&settings, &factory.to_string()).unwrap(),
        factory
    );
    assert!(resolve_contract(&settings, &Address::account([1; 32]).to_string()).is_err());
}
