//! Identifier generation for appended entities.
//!
//! Messages, cart and wishlist entries, notifications, captured images and
//! conversations all receive an [`EntityId`] at append time. Ids come from an
//! injected [`IdGenerator`] so two appends inside the same clock tick can
//! never collide.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of an appended entity.
///
/// Serialized as a bare number, matching the millisecond-timestamp ids
/// the web client stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Source of fresh entity ids.
pub trait IdGenerator: Send + Sync {
    /// Returns an id never returned before by this generator.
    fn next_id(&self) -> EntityId;

    /// Records an id issued elsewhere (e.g. by a previous run) so every
    /// later [`next_id`](IdGenerator::next_id) is greater than it.
    fn observe(&self, id: EntityId);
}

/// Millisecond wall-clock ids, bumped to stay strictly increasing.
///
/// Ids look like the creation timestamp (so they still sort by creation
/// time), but when the clock has not advanced since the last call, or has
/// gone backwards, the previous id plus one is issued instead.
#[derive(Debug, Default)]
pub struct MonotonicClockIds {
    last: AtomicU64,
}

impl MonotonicClockIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

impl IdGenerator for MonotonicClockIds {
    fn next_id(&self) -> EntityId {
        let now = Self::now_millis();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current.saturating_add(1));
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return EntityId(candidate),
                Err(observed) => current = observed,
            }
        }
    }

    fn observe(&self, id: EntityId) {
        self.last.fetch_max(id.0, Ordering::AcqRel);
    }
}

/// Plain counter ids. Deterministic, which makes it the generator of choice in tests.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> EntityId {
        EntityId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    fn observe(&self, id: EntityId) {
        self.next.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}
