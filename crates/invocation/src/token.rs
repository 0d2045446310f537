use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Monotonic generation clock; one generation per run.
#[derive(Debug, Default, Clone)]
pub(crate) struct GenerationClock {
    next: Arc<AtomicU64>,
}

impl GenerationClock {
    /// Returns the next generation ID, starting at 1.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }
}

/// Generation-scoped cancellation token for one run.
#[derive(Debug, Clone)]
pub(crate) struct GenerationToken {
    generation: u64,
    cancel: CancellationToken,
}

impl GenerationToken {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cancel: CancellationToken::new(),
        }
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_monotonic() {
        let clock = GenerationClock::default();
        assert_eq!(clock.next(), 1);
        assert_eq!(clock.next(), 2);
        assert_eq!(clock.clone().next(), 3);
    }

    #[test]
    fn cancel_is_visible_through_token() {
        let token = GenerationToken::new(4);
        assert!(!token.token().is_cancelled());
        token.cancel();
        assert!(token.token().is_cancelled());
        assert_eq!(token.generation(), 4);
    }
}
