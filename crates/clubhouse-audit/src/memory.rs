//! In-memory implementation of `AccessAuditor`.
//!
//! `InMemoryActivityLog` keeps a bounded window of the most recent events
//! behind a `Mutex`, so the access gate can record from any request task.
//! When the window is full the oldest event is discarded and its hash
//! becomes the window's anchor, so the retained events still verify.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use clubhouse_contracts::{
    access::AccessRecord,
    error::{ClubError, ClubResult},
};
use clubhouse_core::traits::AccessAuditor;

use crate::{
    chain::{hash_event, verify_window},
    event::{ActivityEvent, ActivityLog},
};

/// Events retained by `InMemoryActivityLog::new`.
pub const DEFAULT_CAPACITY: usize = 10_000;

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    /// Retained events, oldest first.
    pub(crate) events: VecDeque<ActivityEvent>,

    /// Number of events discarded from the front of the window.
    pub(crate) dropped: u64,

    /// `prev_hash` of the oldest retained event.
    pub(crate) anchor_hash: String,

    /// The `this_hash` of the last written event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,
}

// ── Public log ────────────────────────────────────────────────────────────────

/// An in-memory, append-only activity log backed by a SHA-256 hash chain.
pub struct InMemoryActivityLog {
    log_id: String,
    capacity: usize,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryActivityLog {
    pub fn new(log_id: impl Into<String>) -> Self {
        Self::with_capacity(log_id, DEFAULT_CAPACITY)
    }

    /// A log retaining at most `capacity` events (at least one).
    pub fn with_capacity(log_id: impl Into<String>, capacity: usize) -> Self {
        let state = InMemoryState {
            events: VecDeque::new(),
            dropped: 0,
            anchor_hash: ActivityEvent::GENESIS_HASH.to_string(),
            last_hash: ActivityEvent::GENESIS_HASH.to_string(),
        };
        Self {
            log_id: log_id.into(),
            capacity: capacity.max(1),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot every retained event.
    pub fn export_log(&self) -> ClubResult<ActivityLog> {
        self.export_recent(self.capacity)
    }

    /// Snapshot the `limit` most recent events, oldest first.
    pub fn export_recent(&self, limit: usize) -> ClubResult<ActivityLog> {
        let state = self.lock()?;
        let skip = state.events.len().saturating_sub(limit);
        let events: Vec<ActivityEvent> = state.events.iter().skip(skip).cloned().collect();

        let first_sequence = state.dropped + skip as u64;
        let anchor_hash = match events.first() {
            Some(first) if skip > 0 => first.prev_hash.clone(),
            Some(_) => state.anchor_hash.clone(),
            None => state.last_hash.clone(),
        };
        let terminal_hash = events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(ActivityLog {
            log_id: self.log_id.clone(),
            events,
            first_sequence,
            anchor_hash,
            dropped_events: state.dropped,
            exported_at: Utc::now(),
            terminal_hash,
        })
    }

    /// True when the retained window has not been tampered with.
    pub fn verify_integrity(&self) -> ClubResult<bool> {
        let state = self.lock()?;
        Ok(verify_window(
            &state.events,
            state.dropped,
            &state.anchor_hash,
        ))
    }

    /// Number of retained events.
    pub fn len(&self) -> ClubResult<usize> {
        Ok(self.lock()?.events.len())
    }

    pub fn is_empty(&self) -> ClubResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> ClubResult<MutexGuard<'_, InMemoryState>> {
        self.state
            .lock()
            .map_err(|e| ClubError::upstream(format!("activity log lock poisoned: {}", e)))
    }
}

// ── AccessAuditor impl ────────────────────────────────────────────────────────

impl AccessAuditor for InMemoryActivityLog {
    /// Append one access record to the hash chain, discarding the oldest
    /// event when the window is full.
    fn record(&self, record: &AccessRecord) -> ClubResult<()> {
        let mut state = self.lock()?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.dropped + state.events.len() as u64;
        let this_hash = hash_event(&self.log_id, sequence, record, &prev_hash)?;

        debug!(
            sequence,
            operation = %record.operation,
            decision = ?record.decision,
            "access recorded"
        );

        if state.events.len() >= self.capacity {
            if let Some(oldest) = state.events.pop_front() {
                state.anchor_hash = oldest.this_hash;
                state.dropped += 1;
            }
        }

        state.events.push_back(ActivityEvent {
            sequence,
            log_id: self.log_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }
}
