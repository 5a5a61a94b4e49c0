use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(0);

/// Endpoint of a live communication channel.
///
/// Only the identity is modelled. A channel is never duplicated, so two
/// `Value::Channel`s are the same channel exactly when they share this
/// allocation.
#[derive(Debug, PartialEq, Eq)]
pub struct Channel {
    id: u64,
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel {
    pub fn new() -> Self {
        Self {
            id: NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}
