use crate::args::{CliArgs, Command};
use crate::progress;
use crate::wallet;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use market_config::Settings;
use market_core::{Address, ScVal};
use market_invocation::actions::{self, CollectionParams, FungibleParams};
use market_invocation::{
    InvocationOrchestrator, InvocationOutcome, InvocationSpec, NetworkContext, Operation,
};
use market_rpc_client::RpcClient;
use market_smart_contract::bindings::{dj_nft, factory};
use market_smart_contract::{ContractRegistry, FromScVal};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Loads settings and applies command-line overrides
pub fn load_settings(args: &CliArgs) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(network) = args.network {
        settings.network.network = network;
        settings.network.passphrase = None;
    }
    if let Some(url) = &args.rpc_url {
        settings.network.rpc_url = Some(url.clone());
    }
    settings.validate()?;
    Ok(settings)
}

/// Registry of every named contract whose schema is bundled
pub fn registry(settings: &Settings) -> Result<ContractRegistry> {
    let mut registry = ContractRegistry::new();
    for name in settings.contracts.keys() {
        let address = settings.contract(name)?;
        match name.as_str() {
            factory::CONTRACT_NAME => registry.register(address, factory::spec()),
            dj_nft::CONTRACT_NAME => registry.register(address, dj_nft::spec()),
            other => warn!(target: "market::cli", contract = other, "no bundled schema; skipping"),
        }
    }
    Ok(registry)
}

/// Accepts either a contract id or a name from `[contracts]`
pub fn resolve_contract(settings: &Settings, name_or_id: &str) -> Result<Address> {
    if let Ok(address) = Address::parse(name_or_id) {
        if address.is_contract() {
            return Ok(address);
        }
        bail!("{} is not a contract address", name_or_id);
    }
    Ok(settings.contract(name_or_id)?)
}

pub async fn execute(args: CliArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let key = wallet::load_key(args.secret_key.as_deref())?;
    let identity = key.address();
    info!(target: "market::cli", %identity, network = %settings.network.network.display_name(), "signing account");

    let client = Arc::new(RpcClient::new(
        settings.network.rpc_url()?,
        Some(settings.invocation.submission_timeout()),
    )?);
    let (signer, _prompt) = wallet::signer(key, args.interactive, settings.network.passphrase());
    let orchestrator = Arc::new(InvocationOrchestrator::new(
        client,
        signer,
        Arc::new(registry(&settings)?),
        settings.invocation.clone(),
        NetworkContext::new(settings.network.passphrase()),
    ));

    match args.command {
        Command::Invoke {
            contract,
            method,
            args,
        } => {
            let contract = resolve_contract(&settings, &contract)?;
            let args: IndexMap<_, _> = args.into_iter().collect();
            let spec = InvocationSpec::new(contract, method, identity).with_args(args);
            let value = run::<ScVal>(orchestrator, spec, &settings).await?;
            println!("Result: {:?}", value);
        }
        Command::Claim { contract } => {
            let contract = resolve_contract(&settings, &contract)?;
            let spec = actions::claim_reward(contract, identity);
            let token_id = run::<u32>(orchestrator, spec, &settings).await?;
            println!("Claimed reward #{}", token_id);
        }
        Command::CreateCollection {
            name,
            symbol,
            base_uri,
        } => {
            let factory = settings.contract(factory::CONTRACT_NAME)?;
            let params = CollectionParams {
                name,
                symbol,
                base_uri,
            };
            let spec = actions::create_collection(factory, identity, &params)?;
            let collection = run::<Address>(orchestrator, spec, &settings).await?;
            println!("Collection deployed at {}", collection);
        }
        Command::CreateToken {
            name,
            symbol,
            decimals,
        } => {
            let factory = settings.contract(factory::CONTRACT_NAME)?;
            let params = FungibleParams {
                name,
                symbol,
                decimals,
            };
            let spec = actions::create_fungible(factory, identity, &params)?;
            let token = run::<Address>(orchestrator, spec, &settings).await?;
            println!("Token deployed at {}", token);
        }
        Command::DeployAsset { code } => {
            let factory = settings.contract(factory::CONTRACT_NAME)?;
            let spec = actions::deploy_asset_contract(factory, identity, &code)?;
            let asset = run::<Address>(orchestrator, spec, &settings).await?;
            println!("Asset contract deployed at {}", asset);
        }
    }
    Ok(())
}

/// Runs one operation to completion, printing progress. Ctrl-C cancels.
async fn run<T>(
    orchestrator: Arc<InvocationOrchestrator>,
    spec: InvocationSpec,
    settings: &Settings,
) -> Result<T>
where
    T: FromScVal + Clone + Debug + Send + Sync + 'static,
{
    let operation = Operation::<T>::new(orchestrator);
    let mut updates = operation.subscribe();
    operation.run(spec)?;

    loop {
        tokio::select! {
            interrupted = signal::ctrl_c() => {
                interrupted.context("waiting for Ctrl-C")?;
                eprintln!("Cancelling…");
                operation.cancel();
            }
            update = updates.recv() => {
                let Some(state) = update else {
                    bail!("operation dropped before completing");
                };
                for line in progress::render(&state, &settings.network) {
                    eprintln!("{}", line);
                }
                if let Some(outcome) = state.outcome {
                    return match outcome {
                        InvocationOutcome::Ok(value) => Ok(value),
                        other => Err(anyhow!("{}", other)),
                    };
                }
            }
        }
    }
}
