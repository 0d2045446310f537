//! Turns an [`InvocationSpec`] into an unsigned envelope ready for signing.
//!
//! Building reads the source account's sequence number and dry-runs the call,
//! so a call that would be rejected deterministically fails here, before any
//! signature is requested.

use crate::InvocationSpec;
use market_core::{
    HostInvocation, ResourceFootprint, TransactionBody, UnsignedEnvelope,
};
use market_rpc_client::{SimulationCost, SimulationResult, SubmissionClient};
use market_smart_contract::{
    encode_args, CodecError, ContractRegistry, EncodingError, ResolvedMethod, ResultCodec,
};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("contract error {code}: {name}")]
    Contract { code: u32, name: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<CodecError> for BuildError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Contract { code, name } => BuildError::Contract { code, name },
            CodecError::Decode(reason) => BuildError::Decode(reason),
        }
    }
}

/// An envelope that passed simulation, with the schema it was built against
#[derive(Debug)]
pub struct BuiltInvocation {
    pub envelope: UnsignedEnvelope,
    pub method: ResolvedMethod,
    pub cost: SimulationCost,
}

pub struct InvocationBuilder {
    client: Arc<dyn SubmissionClient>,
    registry: Arc<ContractRegistry>,
    base_fee: u32,
    validity: Duration,
}

impl InvocationBuilder {
    pub fn new(
        client: Arc<dyn SubmissionClient>,
        registry: Arc<ContractRegistry>,
        base_fee: u32,
        validity: Duration,
    ) -> Self {
        Self {
            client,
            registry,
            base_fee,
            validity,
        }
    }

    pub async fn build(&self, spec: &InvocationSpec) -> Result<BuiltInvocation, BuildError> {
        let method = self.registry.resolve(spec.contract(), spec.method())?;
        let args = encode_args(&method.method, spec.args())?;

        let sequence = self
            .client
            .get_sequence(spec.identity())
            .await
            .map_err(|e| BuildError::Network(format!("sequence lookup failed: {}", e)))?
            .saturating_add(1);

        let base_fee = spec.options().base_fee.unwrap_or(self.base_fee);
        let validity = spec.options().valid_for.unwrap_or(self.validity);
        let mut body = TransactionBody {
            source: *spec.identity(),
            sequence,
            fee: base_fee,
            valid_until: unix_now().saturating_add(validity.as_secs()),
            invocation: HostInvocation {
                contract: *spec.contract(),
                method: spec.method().to_string(),
                args,
            },
            resources: None,
        };

        let draft = envelope(&body)?;
        trace!(target: "market::builder", sequence, "simulating");
        let simulation = self
            .client
            .simulate(&draft)
            .await
            .map_err(|e| BuildError::Network(e.to_string()))?;

        let cost = match simulation {
            SimulationResult::Success { cost, preview } => {
                // A successful dry run can still carry a contract error or a
                // payload that does not match the schema.
                ResultCodec::decode(&preview, &method.method, method.contract.errors())?;
                cost
            }
            SimulationResult::Failed { raw: Some(raw), message } => {
                debug!(target: "market::builder", %message, "simulation rejected the call");
                return Err(match ResultCodec::decode(&raw, &method.method, method.contract.errors()) {
                    Err(err) => err.into(),
                    Ok(_) => BuildError::Decode(format!(
                        "simulation failed ({}) but carried a success value",
                        message
                    )),
                });
            }
            SimulationResult::Failed { raw: None, message } => {
                return Err(BuildError::Network(format!("simulation failed: {}", message)));
            }
        };

        body.fee = total_fee(base_fee, &cost);
        body.resources = Some(ResourceFootprint {
            instructions: cost.instructions,
            read_bytes: cost.read_bytes,
            write_bytes: cost.write_bytes,
            resource_fee: cost.min_resource_fee,
        });

        Ok(BuiltInvocation {
            envelope: envelope(&body)?,
            method,
            cost,
        })
    }
}

fn envelope(body: &TransactionBody) -> Result<UnsignedEnvelope, BuildError> {
    UnsignedEnvelope::new(body).map_err(|e| {
        BuildError::Encoding(EncodingError::Invalid {
            arg: "envelope".to_string(),
            reason: e.to_string(),
        })
    })
}

fn total_fee(base_fee: u32, cost: &SimulationCost) -> u32 {
    let total = i64::from(base_fee).saturating_add(cost.min_resource_fee.max(0));
    u32::try_from(total).unwrap_or(u32::MAX)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_adds_resource_fee() {
        let cost = SimulationCost {
            min_resource_fee: 5_000,
            ..Default::default()
        };
        assert_eq!(total_fee(100, &cost), 5_100);
    }

    #[test]
    fn fee_saturates() {
        let cost = SimulationCost {
            min_resource_fee: i64::MAX,
            ..Default::default()
        };
        assert_eq!(total_fee(100, &cost), u32::MAX);
    }

    #[test]
    fn negative_resource_fee_is_ignored() {
        let cost = SimulationCost {
            min_resource_fee: -10,
            ..Default::default()
        };
        assert_eq!(total_fee(100, &cost), 100);
    }
}
