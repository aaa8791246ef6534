//! Generation counter used to discard superseded enrichment batches.
//!
//! Every pipeline invocation advances the generation and carries the
//! resulting token. At merge time the token is compared against the
//! counter; if a newer invocation has started, the batch is stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared, monotonically increasing invocation counter.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new invocation, superseding every outstanding token.
    pub fn advance(&self) -> EpochToken {
        let value = self.0.fetch_add(1, Ordering::AcqRel) + 1;
        EpochToken {
            generation: self.clone(),
            value,
        }
    }

    /// The most recently issued epoch (0 before any invocation).
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}

/// Epoch captured when a batch was dispatched.
#[derive(Debug, Clone)]
pub struct EpochToken {
    generation: Generation,
    value: u64,
}

impl EpochToken {
    /// A token from a private generation that nothing else can advance.
    pub fn detached() -> Self {
        Generation::new().advance()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether no newer invocation has started since this token was issued.
    pub fn is_current(&self) -> bool {
        self.generation.current() == self.value
    }
}

/// Returned when a batch finished after a newer invocation began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("enrichment batch superseded by a newer request (epoch {epoch})")]
pub struct Superseded {
    pub epoch: u64,
}
