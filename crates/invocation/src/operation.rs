//! Observable binding for one logical action.
//!
//! An [`Operation`] owns one [`OperationState`] and runs at most one
//! invocation at a time. Every transition is pushed to subscribers. Each run
//! is tagged with a generation; updates from a run that is no longer current
//! (cancelled, or superseded by a newer run) are dropped.

use crate::orchestrator::InvocationOrchestrator;
use crate::outcome::{InvocationOutcome, OperationState, Progress, Status};
use crate::token::{GenerationClock, GenerationToken};
use crate::InvocationSpec;
use market_smart_contract::FromScVal;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::debug;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// A run is already in flight; runs are rejected, not queued
    #[error("an invocation is already in flight ({0:?})")]
    InFlight(Status),

    #[error("no tokio runtime to drive the invocation")]
    NoRuntime,
}

struct Shared<T> {
    state: OperationState<T>,
    active: Option<GenerationToken>,
    subscribers: Vec<mpsc::UnboundedSender<OperationState<T>>>,
}

struct Inner<T> {
    orchestrator: Arc<InvocationOrchestrator>,
    clock: GenerationClock,
    shared: Mutex<Shared<T>>,
    latest: watch::Sender<OperationState<T>>,
}

/// Single-flight handle for one logical action. Clones share the same state.
pub struct Operation<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Operation<T>
where
    T: FromScVal + Clone + Send + Sync + 'static,
{
    pub fn new(orchestrator: Arc<InvocationOrchestrator>) -> Self {
        let (latest, _) = watch::channel(OperationState::idle());
        Self {
            inner: Arc::new(Inner {
                orchestrator,
                clock: GenerationClock::default(),
                shared: Mutex::new(Shared {
                    state: OperationState::idle(),
                    active: None,
                    subscribers: Vec::new(),
                }),
                latest,
            }),
        }
    }

    /// Starts a run in the background. The result is delivered through state.
    ///
    /// Rejected while another run is in flight, or when called outside a
    /// tokio runtime. Starting from `Done` discards the previous outcome.
    pub fn run(&self, spec: InvocationSpec) -> Result<(), OperationError> {
        let runtime = Handle::try_current().map_err(|_| OperationError::NoRuntime)?;
        let token = {
            let mut shared = self.inner.shared.lock();
            if shared.state.status.is_active() {
                return Err(OperationError::InFlight(shared.state.status));
            }
            let token = GenerationToken::new(self.inner.clock.next());
            shared.active = Some(token.clone());
            shared.state = OperationState {
                status: Status::Building,
                outcome: None,
                tx_hash: None,
            };
            self.inner.publish(&mut shared);
            token
        };

        let inner = self.inner.clone();
        runtime.spawn(async move {
            let generation = token.generation();
            let outcome = inner
                .orchestrator
                .execute::<T, _>(&spec, token.token(), |progress| {
                    inner.apply(generation, progress)
                })
                .await;
            inner.finish(generation, outcome);
        });
        Ok(())
    }

    /// Moves an in-flight run to `Done(Cancelled)` immediately. No effect when
    /// idle or already done.
    pub fn cancel(&self) {
        let mut shared = self.inner.shared.lock();
        if !shared.state.status.is_active() {
            return;
        }
        if let Some(token) = shared.active.take() {
            debug!(target: "market::operation", generation = token.generation(), "cancelling run");
            token.cancel();
        }
        shared.state.status = Status::Done;
        shared.state.outcome = Some(InvocationOutcome::Cancelled);
        self.inner.publish(&mut shared);
    }

    pub fn state(&self) -> OperationState<T> {
        self.inner.shared.lock().state.clone()
    }

    /// Receives the current state followed by every subsequent transition
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<OperationState<T>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut shared = self.inner.shared.lock();
        // Registered under the lock, so no transition can slip in between
        // the snapshot and the subscription.
        if tx.send(shared.state.clone()).is_ok() {
            shared.subscribers.push(tx);
        }
        rx
    }

    /// Waits until the current run is `Done` and returns its final state.
    /// Does not return while the operation is idle.
    pub async fn finished(&self) -> OperationState<T> {
        let mut rx = self.inner.latest.subscribe();
        let result = rx.wait_for(|state| state.is_done()).await.map(|s| s.clone());
        match result {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }
}

impl<T: Clone> Inner<T> {
    fn publish(&self, shared: &mut Shared<T>) {
        let state = shared.state.clone();
        shared
            .subscribers
            .retain(|subscriber| subscriber.send(state.clone()).is_ok());
        self.latest.send_replace(state);
    }

    fn is_current(shared: &Shared<T>, generation: u64) -> bool {
        shared
            .active
            .as_ref()
            .is_some_and(|token| token.generation() == generation)
    }

    fn apply(&self, generation: u64, progress: Progress) {
        let mut shared = self.shared.lock();
        if !Self::is_current(&shared, generation) {
            debug!(target: "market::operation", generation, ?progress, "dropping stale transition");
            return;
        }
        let status = progress.status();
        let tx_hash = match progress {
            Progress::Confirming(hash) => Some(hash),
            _ => shared.state.tx_hash,
        };
        if shared.state.status == status && shared.state.tx_hash == tx_hash {
            return;
        }
        shared.state.status = status;
        shared.state.tx_hash = tx_hash;
        self.publish(&mut shared);
    }

    fn finish(&self, generation: u64, outcome: InvocationOutcome<T>) {
        let mut shared = self.shared.lock();
        if !Self::is_current(&shared, generation) {
            debug!(target: "market::operation", generation, "dropping stale outcome");
            return;
        }
        shared.active = None;
        shared.state.status = Status::Done;
        shared.state.outcome = Some(outcome);
        self.publish(&mut shared);
    }
}
