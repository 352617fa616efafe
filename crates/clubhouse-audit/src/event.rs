//! Activity event and log types.
//!
//! `ActivityEvent` is a single entry in the hash chain. It wraps an
//! `AccessRecord` with sequence numbering and the SHA-256 hashes that make
//! tampering detectable. `ActivityLog` is the snapshot handed to admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_contracts::access::AccessRecord;

/// A single entry in the SHA-256 hash chain.
///
/// Modifying any field (including those of the embedded `record`)
/// invalidates `this_hash` and every subsequent `prev_hash`, which
/// `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The log this event belongs to (one per process by default).
    pub log_id: String,

    /// The access decision being recorded.
    pub record: AccessRecord,

    /// Hash (hex) of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hash (hex) over (log_id, sequence, prev_hash, canonical JSON of record).
    pub this_hash: String,
}

impl ActivityEvent {
    /// The sentinel `prev_hash` used for the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub log_id: String,

    /// Events in chain order, oldest retained first.
    pub events: Vec<ActivityEvent>,

    /// Sequence number of the first listed event.
    pub first_sequence: u64,

    /// The `prev_hash` the first listed event must carry: `GENESIS_HASH`
    /// when nothing precedes it, otherwise the hash of the event before it.
    pub anchor_hash: String,

    /// Events older than the retained window that have been discarded.
    pub dropped_events: u64,

    /// Wall-clock time (UTC) the snapshot was taken.
    pub exported_at: DateTime<Utc>,

    /// The `this_hash` of the last event. Empty string if the log is empty.
    pub terminal_hash: String,
}
