//! Human-readable rendering of operation state.

use market_config::NetworkSettings;
use market_invocation::{OperationState, Status};

pub fn describe(status: Status) -> &'static str {
    match status {
        Status::Idle => "Idle",
        Status::Building => "Building transaction…",
        Status::AwaitingSignature => "Waiting for signature…",
        Status::Submitting => "Submitting…",
        Status::Confirming => "Confirming…",
        Status::Done => "Done",
    }
}

/// Lines to print for a state update; terminal states are reported by the
/// caller
pub fn render<T>(state: &OperationState<T>, network: &NetworkSettings) -> Vec<String> {
    if matches!(state.status, Status::Idle | Status::Done) {
        return Vec::new();
    }
    let mut lines = vec![describe(state.status).to_string()];
    if state.status == Status::Confirming {
        if let Some(receipt) = state.receipt() {
            lines.push(receipt);
        }
        if let Some(link) = state
            .tx_hash
            .and_then(|hash| network.explorer_link(&hash.to_hex()))
        {
            lines.push(link);
        }
    }
    lines
}
