//! Single-slot gate for user-triggered backend calls

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// At most one operation holds the permit; everyone else is turned away
#[derive(Clone)]
pub struct BusyGate {
    slot: Arc<Semaphore>,
}

/// Proof of being the one outstanding operation. Released on drop.
#[derive(Debug)]
pub struct BusyPermit {
    _permit: OwnedSemaphorePermit,
}

impl BusyGate {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Take the slot without waiting; `None` while another operation holds it
    pub fn try_acquire(&self) -> Option<BusyPermit> {
        self.slot
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| BusyPermit { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for BusyGate {
    fn default() -> Self {
        Self::new()
    }
}
