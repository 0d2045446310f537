//! Scripted in-process collaborators for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use market_config::InvocationSettings;
use market_core::{Address, ScVal, SignedEnvelope, TxHash, UnsignedEnvelope};
use market_invocation::{InvocationOrchestrator, InvocationSpec, NetworkContext};
use market_rpc_client::{
    PollStatus, RpcException, SimulationCost, SimulationResult, SubmissionClient,
    SubmissionHandle,
};
use market_smart_contract::bindings::factory;
use market_smart_contract::{
    ContractRegistry, ContractResult, ContractSpec, MethodSpec, ParameterSpec, ResultCodec,
    ScType,
};
use market_wallets::{KeyPair, SignerError, SignerGateway, SigningContext};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Notify};

pub const PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const CLAIM_HASH: &str = "7f3a9c0e";

pub fn rewards_contract() -> Address {
    Address::contract([7; 32])
}

pub fn registry() -> Arc<ContractRegistry> {
    let spec = ContractSpec::new("rewards")
        .with_errors(factory::errors())
        .with_method(
            MethodSpec::new("claim")
                .input(ParameterSpec::new("to", ScType::Address))
                .returns(ScType::String)
                .fallible(),
        )
        .with_method(
            MethodSpec::new("transfer")
                .input(ParameterSpec::new("amount", ScType::I128))
                .returns(ScType::Void)
                .fallible(),
        );
    Arc::new(ContractRegistry::new().with_contract(rewards_contract(), spec))
}

pub fn claim_spec(identity: Address) -> InvocationSpec {
    InvocationSpec::new(rewards_contract(), "claim", identity).arg("to", identity.to_strkey())
}

pub fn ok_raw(value: ScVal) -> Vec<u8> {
    ResultCodec::encode(&ContractResult::Ok(value)).unwrap()
}

pub fn err_raw(code: u32) -> Vec<u8> {
    ResultCodec::encode(&ContractResult::Err(code)).unwrap()
}

pub fn claim_success() -> Vec<u8> {
    ok_raw(ScVal::String(CLAIM_HASH.to_string()))
}

pub fn submitted_hash() -> TxHash {
    TxHash::new([0x7f; 32])
}

pub fn simulation_ok(preview: Vec<u8>) -> SimulationResult {
    SimulationResult::Success {
        cost: SimulationCost {
            instructions: 1_000,
            read_bytes: 64,
            write_bytes: 32,
            min_resource_fee: 400,
        },
        preview,
    }
}

/// Submission client answering from a script. Polls past the end of the
/// script report `Pending`.
pub struct ScriptedClient {
    simulation: Mutex<SimulationResult>,
    submit_result: Mutex<Option<Result<SubmissionHandle, RpcException>>>,
    polls: Mutex<VecDeque<Result<PollStatus, RpcException>>>,
    pub simulate_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub poll_calls: AtomicUsize,
    pub submitted_fee: Mutex<Option<u32>>,
}

impl ScriptedClient {
    pub fn new(simulation: SimulationResult) -> Self {
        Self {
            simulation: Mutex::new(simulation),
            submit_result: Mutex::new(Some(Ok(SubmissionHandle {
                hash: submitted_hash(),
                latest_ledger: Some(10),
            }))),
            polls: Mutex::new(VecDeque::new()),
            simulate_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
            submitted_fee: Mutex::new(None),
        }
    }

    pub fn with_polls(self, polls: Vec<Result<PollStatus, RpcException>>) -> Self {
        *self.polls.lock() = polls.into();
        self
    }

    pub fn with_submit_error(self, err: RpcException) -> Self {
        *self.submit_result.lock() = Some(Err(err));
        self
    }

    pub fn submits(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn simulations(&self) -> usize {
        self.simulate_calls.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionClient for ScriptedClient {
    async fn get_sequence(&self, _account: &Address) -> Result<u64, RpcException> {
        Ok(41)
    }

    async fn simulate(&self, _envelope: &UnsignedEnvelope) -> Result<SimulationResult, RpcException> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.simulation.lock().clone())
    }

    async fn submit(&self, envelope: SignedEnvelope) -> Result<SubmissionHandle, RpcException> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        *self.submitted_fee.lock() = envelope.body().ok().map(|body| body.fee);
        self.submit_result
            .lock()
            .take()
            .unwrap_or_else(|| Err(RpcException::internal("submitted twice")))
    }

    async fn poll(&self, _handle: &SubmissionHandle) -> Result<PollStatus, RpcException> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.polls.lock().pop_front().unwrap_or(Ok(PollStatus::Pending))
    }
}

pub enum SignerScript {
    Approve,
    Reject,
    /// Waits for `true` (approve) or `false` (reject)
    Gated(oneshot::Receiver<bool>),
    /// Answers after a delay
    Delayed(Duration, bool),
    Never,
}

/// Signer answering from a script; approves once the script is used up
pub struct ScriptedSigner {
    key: KeyPair,
    script: Mutex<Option<SignerScript>>,
    prompts: AtomicUsize,
    pub prompted: Notify,
}

impl ScriptedSigner {
    pub fn new(key: KeyPair, script: SignerScript) -> Self {
        Self {
            key,
            script: Mutex::new(Some(script)),
            prompts: AtomicUsize::new(0),
            prompted: Notify::new(),
        }
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    fn approve(&self, envelope: UnsignedEnvelope, context: &SigningContext) -> SignedEnvelope {
        let signature = self.key.sign(&envelope.hash(&context.network));
        SignedEnvelope::new(envelope, vec![signature])
    }
}

#[async_trait]
impl SignerGateway for ScriptedSigner {
    async fn sign(
        &self,
        envelope: UnsignedEnvelope,
        context: &SigningContext,
    ) -> Result<SignedEnvelope, SignerError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.prompted.notify_one();
        let script = self.script.lock().take().unwrap_or(SignerScript::Approve);
        let approved = match script {
            SignerScript::Approve => true,
            SignerScript::Reject => false,
            SignerScript::Gated(answer) => answer
                .await
                .map_err(|_| SignerError::Unavailable("gate dropped".into()))?,
            SignerScript::Delayed(delay, approve) => {
                tokio::time::sleep(delay).await;
                approve
            }
            SignerScript::Never => std::future::pending().await,
        };
        if approved {
            Ok(self.approve(envelope, context))
        } else {
            Err(SignerError::Rejected)
        }
    }
}

pub fn settings() -> InvocationSettings {
    InvocationSettings::default()
}

pub fn orchestrator(
    client: Arc<dyn SubmissionClient>,
    signer: Arc<dyn SignerGateway>,
    settings: InvocationSettings,
) -> Arc<InvocationOrchestrator> {
    Arc::new(InvocationOrchestrator::new(
        client,
        signer,
        registry(),
        settings,
        NetworkContext::new(PASSPHRASE),
    ))
}
