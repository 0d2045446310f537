use market_core::TxHash;
use std::fmt;

/// Suspension point at which a time budget elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Simulation,
    Signing,
    Submission,
    Confirmation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Simulation => "simulation",
            Stage::Signing => "signing",
            Stage::Submission => "submission",
            Stage::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

/// Terminal result of one run. Exactly one is produced per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome<T> {
    Ok(T),
    /// The contract rejected the call, at simulation or on-chain
    ContractErr { code: u32, name: String },
    /// Arguments could not be represented for the method; nothing was sent
    EncodingError(String),
    /// The response did not match the declared schema
    DecodeError(String),
    NetworkErr(String),
    /// Applied on-chain and failed without a contract result
    TransactionFailed,
    SignerRejected,
    /// No signer could service the request, or it is on another network
    SignerUnavailable(String),
    TimedOut(Stage),
    Cancelled,
}

impl<T> InvocationOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, InvocationOutcome::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            InvocationOutcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> InvocationOutcome<U> {
        match self {
            InvocationOutcome::Ok(value) => InvocationOutcome::Ok(f(value)),
            InvocationOutcome::ContractErr { code, name } => {
                InvocationOutcome::ContractErr { code, name }
            }
            InvocationOutcome::EncodingError(e) => InvocationOutcome::EncodingError(e),
            InvocationOutcome::DecodeError(e) => InvocationOutcome::DecodeError(e),
            InvocationOutcome::NetworkErr(e) => InvocationOutcome::NetworkErr(e),
            InvocationOutcome::TransactionFailed => InvocationOutcome::TransactionFailed,
            InvocationOutcome::SignerRejected => InvocationOutcome::SignerRejected,
            InvocationOutcome::SignerUnavailable(e) => InvocationOutcome::SignerUnavailable(e),
            InvocationOutcome::TimedOut(stage) => InvocationOutcome::TimedOut(stage),
            InvocationOutcome::Cancelled => InvocationOutcome::Cancelled,
        }
    }

    /// Short machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            InvocationOutcome::Ok(_) => "ok",
            InvocationOutcome::ContractErr { .. } => "contract_error",
            InvocationOutcome::EncodingError(_) => "encoding_error",
            InvocationOutcome::DecodeError(_) => "decode_error",
            InvocationOutcome::NetworkErr(_) => "network_error",
            InvocationOutcome::TransactionFailed => "transaction_failed",
            InvocationOutcome::SignerRejected => "signer_rejected",
            InvocationOutcome::SignerUnavailable(_) => "signer_unavailable",
            InvocationOutcome::TimedOut(_) => "timed_out",
            InvocationOutcome::Cancelled => "cancelled",
        }
    }
}

impl<T: fmt::Debug> fmt::Display for InvocationOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationOutcome::Ok(value) => write!(f, "ok: {:?}", value),
            InvocationOutcome::ContractErr { code, name } => {
                write!(f, "contract error {} ({})", code, name)
            }
            InvocationOutcome::EncodingError(e) => write!(f, "invalid arguments: {}", e),
            InvocationOutcome::DecodeError(e) => write!(f, "unexpected response: {}", e),
            InvocationOutcome::NetworkErr(e) => write!(f, "network error: {}", e),
            InvocationOutcome::TransactionFailed => write!(f, "transaction failed on-chain"),
            InvocationOutcome::SignerRejected => write!(f, "signature request rejected"),
            InvocationOutcome::SignerUnavailable(e) => write!(f, "signer unavailable: {}", e),
            InvocationOutcome::TimedOut(stage) => write!(f, "timed out during {}", stage),
            InvocationOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Position of a run in the invocation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Building,
    AwaitingSignature,
    Submitting,
    Confirming,
    Done,
}

impl Status {
    /// Whether a run is in flight
    pub fn is_active(self) -> bool {
        !matches!(self, Status::Idle | Status::Done)
    }
}

/// Transition reported by the orchestrator while a run progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Building,
    AwaitingSignature,
    Submitting,
    /// The node accepted the transaction under this hash
    Confirming(TxHash),
}

impl Progress {
    pub fn status(&self) -> Status {
        match self {
            Progress::Building => Status::Building,
            Progress::AwaitingSignature => Status::AwaitingSignature,
            Progress::Submitting => Status::Submitting,
            Progress::Confirming(_) => Status::Confirming,
        }
    }
}

/// Observable state of one logical action. `outcome` is set only when
/// `status` is [`Status::Done`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationState<T> {
    pub status: Status,
    pub outcome: Option<InvocationOutcome<T>>,
    /// Hash of the submitted transaction, once the node accepted it
    pub tx_hash: Option<TxHash>,
}

impl<T> OperationState<T> {
    pub fn idle() -> Self {
        Self {
            status: Status::Idle,
            outcome: None,
            tx_hash: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// `Tx: 7f3a0c91d2…` style receipt, once a hash is known
    pub fn receipt(&self) -> Option<String> {
        self.tx_hash.map(|hash| {
            let hex = hash.to_hex();
            format!("Tx: {}…", &hex[..10])
        })
    }
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_shows_hash_prefix() {
        let mut state = OperationState::<()>::idle();
        assert_eq!(state.receipt(), None);
        state.tx_hash = Some(TxHash::new([0x7f; 32]));
        assert_eq!(state.receipt().as_deref(), Some("Tx: 7f7f7f7f7f…"));
    }

    #[test]
    fn map_preserves_failures() {
        let outcome: InvocationOutcome<u32> = InvocationOutcome::TimedOut(Stage::Signing);
        assert_eq!(outcome.map(|v| v + 1), InvocationOutcome::TimedOut(Stage::Signing));
        assert_eq!(InvocationOutcome::Ok(1u32).map(|v| v + 1), InvocationOutcome::Ok(2));
    }

    #[test]
    fn only_pipeline_states_are_active() {
        assert!(!Status::Idle.is_active());
        assert!(Status::AwaitingSignature.is_active());
        assert!(!Status::Done.is_active());
    }
}
