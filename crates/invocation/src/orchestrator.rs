//! The invocation state machine.
//!
//! One run moves strictly forward through
//! `Building → AwaitingSignature → Submitting → Confirming` and ends with a
//! single [`InvocationOutcome`]. Each of the three external calls is a
//! suspension point with its own time budget. Cancellation is cooperative:
//! it is checked after every suspension point, and a result that arrives
//! after cancellation is discarded instead of applied.

use crate::builder::{BuildError, BuiltInvocation, InvocationBuilder};
use crate::outcome::{InvocationOutcome, Progress, Stage};
use crate::InvocationSpec;
use market_config::InvocationSettings;
use market_core::NetworkId;
use market_rpc_client::{PollStatus, RpcException, SubmissionClient, SubmissionHandle};
use market_smart_contract::{CodecError, ContractRegistry, FromScVal, ResolvedMethod, ResultCodec};
use market_wallets::{SignerError, SignerGateway, SigningContext};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

/// Network identity a deployment runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContext {
    pub passphrase: String,
    pub id: NetworkId,
}

impl NetworkContext {
    pub fn new(passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        Self {
            id: NetworkId::from_passphrase(&passphrase),
            passphrase,
        }
    }
}

/// Runs invocations against one network with shared collaborators.
///
/// The orchestrator holds no per-run state; concurrent runs are independent.
pub struct InvocationOrchestrator {
    client: Arc<dyn SubmissionClient>,
    signer: Arc<dyn SignerGateway>,
    builder: InvocationBuilder,
    settings: InvocationSettings,
    network: NetworkContext,
}

enum Step<T> {
    Delivered(T),
    Elapsed,
    Cancelled,
}

impl InvocationOrchestrator {
    pub fn new(
        client: Arc<dyn SubmissionClient>,
        signer: Arc<dyn SignerGateway>,
        registry: Arc<ContractRegistry>,
        settings: InvocationSettings,
        network: NetworkContext,
    ) -> Self {
        let builder = InvocationBuilder::new(
            client.clone(),
            registry,
            settings.base_fee,
            settings.tx_validity(),
        );
        Self {
            client,
            signer,
            builder,
            settings,
            network,
        }
    }

    pub fn network(&self) -> &NetworkContext {
        &self.network
    }

    pub fn settings(&self) -> &InvocationSettings {
        &self.settings
    }

    /// Runs one invocation to its terminal outcome, reporting each transition
    /// through `on_progress`.
    pub async fn execute<T, F>(
        &self,
        spec: &InvocationSpec,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> InvocationOutcome<T>
    where
        T: FromScVal,
        F: FnMut(Progress) + Send,
    {
        let span = info_span!(
            "invocation",
            contract = %spec.contract(),
            method = %spec.method(),
            identity = %spec.identity(),
        );

        async {
            let outcome = self.drive(spec, cancel, &mut on_progress).await;
            match &outcome {
                InvocationOutcome::Ok(_) => info!("invocation succeeded"),
                InvocationOutcome::Cancelled => debug!("invocation cancelled"),
                other => warn!(outcome = other.kind(), "invocation failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn drive<T, F>(
        &self,
        spec: &InvocationSpec,
        cancel: &CancellationToken,
        on_progress: &mut F,
    ) -> InvocationOutcome<T>
    where
        T: FromScVal,
        F: FnMut(Progress) + Send,
    {
        let mut report = |progress: Progress| {
            debug!(status = ?progress.status(), "transition");
            on_progress(progress);
        };

        report(Progress::Building);
        let built = match suspend(cancel, self.settings.simulation_timeout(), self.builder.build(spec)).await {
            Step::Cancelled => return InvocationOutcome::Cancelled,
            Step::Elapsed => return InvocationOutcome::TimedOut(Stage::Simulation),
            Step::Delivered(Err(err)) => return build_failure(err),
            Step::Delivered(Ok(built)) => built,
        };
        let BuiltInvocation { envelope, method, cost } = built;
        debug!(
            instructions = cost.instructions,
            resource_fee = cost.min_resource_fee,
            "simulation passed"
        );

        report(Progress::AwaitingSignature);
        let context = SigningContext {
            identity: *spec.identity(),
            network: self.network.id,
            network_passphrase: self.network.passphrase.clone(),
        };
        let signed = match suspend(
            cancel,
            self.settings.signing_timeout(),
            self.signer.sign(envelope, &context),
        )
        .await
        {
            Step::Cancelled => return InvocationOutcome::Cancelled,
            Step::Elapsed => return InvocationOutcome::TimedOut(Stage::Signing),
            Step::Delivered(Err(SignerError::Rejected)) => return InvocationOutcome::SignerRejected,
            Step::Delivered(Err(err)) => return InvocationOutcome::SignerUnavailable(err.to_string()),
            Step::Delivered(Ok(signed)) => signed,
        };

        report(Progress::Submitting);
        let handle = match suspend(
            cancel,
            self.settings.submission_timeout(),
            self.client.submit(signed),
        )
        .await
        {
            Step::Cancelled => return InvocationOutcome::Cancelled,
            Step::Elapsed => return InvocationOutcome::TimedOut(Stage::Submission),
            Step::Delivered(Err(err)) => return InvocationOutcome::NetworkErr(err.to_string()),
            Step::Delivered(Ok(handle)) => handle,
        };

        report(Progress::Confirming(handle.hash));
        self.confirm(&handle, &method, cancel).await
    }

    /// Polls until the transaction reaches a terminal status. Transport
    /// failures are retried up to `max_poll_retries` times in a row; pending
    /// results are not failures. A failed transaction is terminal whether or
    /// not it carries a contract result.
    async fn confirm<T: FromScVal>(
        &self,
        handle: &SubmissionHandle,
        method: &ResolvedMethod,
        cancel: &CancellationToken,
    ) -> InvocationOutcome<T> {
        let max_attempts = self.settings.max_poll_attempts;
        let mut consecutive_failures = 0u32;

        for attempt in 1..=max_attempts {
            let failure = match suspend(cancel, self.settings.submission_timeout(), self.client.poll(handle)).await {
                Step::Cancelled => return InvocationOutcome::Cancelled,
                Step::Delivered(Ok(PollStatus::Pending)) => {
                    consecutive_failures = 0;
                    debug!(attempt, "transaction pending");
                    None
                }
                Step::Delivered(Ok(PollStatus::Success(raw))) => {
                    return decode_success(&raw, method);
                }
                Step::Delivered(Ok(PollStatus::Failure(Some(raw)))) => {
                    return decode_failure(&raw, method);
                }
                Step::Delivered(Ok(PollStatus::Failure(None))) => {
                    return InvocationOutcome::TransactionFailed;
                }
                Step::Delivered(Err(err)) => Some(PollFailure::Rpc(err)),
                Step::Elapsed => Some(PollFailure::Elapsed),
            };

            if let Some(failure) = failure {
                consecutive_failures += 1;
                if consecutive_failures > self.settings.max_poll_retries {
                    return failure.into_outcome();
                }
                warn!(
                    attempt,
                    retry = consecutive_failures,
                    max_retries = self.settings.max_poll_retries,
                    "poll failed: {}",
                    failure
                );
            }

            if attempt < max_attempts {
                let interval = self.settings.poll_interval();
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return InvocationOutcome::Cancelled,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        }

        InvocationOutcome::TimedOut(Stage::Confirmation)
    }
}

enum PollFailure {
    Rpc(RpcException),
    Elapsed,
}

impl PollFailure {
    fn into_outcome<T>(self) -> InvocationOutcome<T> {
        match self {
            PollFailure::Rpc(err) => InvocationOutcome::NetworkErr(err.to_string()),
            PollFailure::Elapsed => InvocationOutcome::TimedOut(Stage::Confirmation),
        }
    }
}

impl std::fmt::Display for PollFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollFailure::Rpc(err) => write!(f, "{}", err),
            PollFailure::Elapsed => write!(f, "no response within budget"),
        }
    }
}

/// Awaits one suspension point under a time budget.
///
/// The inner future is polled before the timer, so a response delivered in
/// the same instant the budget elapses wins. Cancellation is checked only
/// once the future settles; a settled result is then discarded.
async fn suspend<T>(
    cancel: &CancellationToken,
    budget: Duration,
    fut: impl Future<Output = T>,
) -> Step<T> {
    let result = tokio::time::timeout(budget, fut).await;
    if cancel.is_cancelled() {
        debug!(elapsed = result.is_err(), "discarding response after cancellation");
        return Step::Cancelled;
    }
    match result {
        Ok(value) => Step::Delivered(value),
        Err(_) => Step::Elapsed,
    }
}

fn build_failure<T>(err: BuildError) -> InvocationOutcome<T> {
    match err {
        BuildError::Encoding(e) => InvocationOutcome::EncodingError(e.to_string()),
        BuildError::Contract { code, name } => InvocationOutcome::ContractErr { code, name },
        BuildError::Decode(reason) => InvocationOutcome::DecodeError(reason),
        BuildError::Network(reason) => InvocationOutcome::NetworkErr(reason),
    }
}

fn codec_failure<T>(err: CodecError) -> InvocationOutcome<T> {
    match err {
        CodecError::Contract { code, name } => InvocationOutcome::ContractErr { code, name },
        CodecError::Decode(reason) => InvocationOutcome::DecodeError(reason),
    }
}

fn decode_success<T: FromScVal>(raw: &[u8], method: &ResolvedMethod) -> InvocationOutcome<T> {
    match ResultCodec::decode_as::<T>(raw, &method.method, method.contract.errors()) {
        Ok(value) => InvocationOutcome::Ok(value),
        Err(err) => codec_failure(err),
    }
}

fn decode_failure<T>(raw: &[u8], method: &ResolvedMethod) -> InvocationOutcome<T> {
    match ResultCodec::decode(raw, &method.method, method.contract.errors()) {
        Err(err) => codec_failure(err),
        Ok(_) => InvocationOutcome::DecodeError(
            "failed transaction carried a success value".to_string(),
        ),
    }
}
