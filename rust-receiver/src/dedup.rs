//! Bounded in-memory deduplication store.
//!
//! Webhook senders deliver at-least-once, so replayed `event_id`s must be
//! recognized and skipped. The store keeps a capacity-bounded window of
//! recently seen ids; when full, the oldest id by insertion order is evicted
//! (deterministic FIFO). An evicted id delivered again is accepted again -
//! retention is a sliding window, not a lifetime guarantee.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

/// Result of an atomic check-and-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupOutcome {
    /// The id was not present and has been recorded.
    Inserted,
    /// The id was already recorded at `first_seen`.
    AlreadySeen { first_seen: DateTime<Utc> },
}

/// Cheaply clonable handle to the shared dedup state.
///
/// All handles share one mutex-guarded map, so two simultaneous deliveries
/// of the same `event_id` can never both observe `Inserted`.
#[derive(Clone)]
pub struct DedupStore {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    seen: HashMap<String, DateTime<Utc>>,
    order: VecDeque<String>,
    capacity: usize,
}

impl DedupStore {
    /// Create a store retaining at most `capacity` event ids.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                seen: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
                capacity,
            })),
        }
    }

    /// Atomically record `event_id`, or report when it was first seen.
    ///
    /// Replays do not refresh an entry's position in the eviction order;
    /// retention is measured from first receipt.
    pub fn check_and_insert(&self, event_id: &str, received_at: DateTime<Utc>) -> DedupOutcome {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(first_seen) = inner.seen.get(event_id) {
            return DedupOutcome::AlreadySeen { first_seen: *first_seen };
        }

        if inner.seen.len() >= inner.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.seen.remove(&oldest);
            }
        }

        inner.seen.insert(event_id.to_string(), received_at);
        inner.order.push_back(event_id.to_string());
        DedupOutcome::Inserted
    }

    /// Number of ids currently retained.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of ids retained before eviction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).capacity
    }
}
