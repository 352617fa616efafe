//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. log_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of the access record (serde_json, no pretty-printing)

use sha2::{Digest, Sha256};

use clubhouse_contracts::{
    access::AccessRecord,
    error::{ClubError, ClubResult},
};

use crate::event::ActivityEvent;

/// Compute the SHA-256 hash for a single activity event.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_event(
    log_id: &str,
    sequence: u64,
    record: &AccessRecord,
    prev_hash: &str,
) -> ClubResult<String> {
    let record_json = serde_json::to_vec(record)
        .map_err(|e| ClubError::upstream(format!("access record not serializable: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(log_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain that starts at genesis.
///
/// Valid when every event links to its predecessor (or `GENESIS_HASH`), its
/// sequence equals its position, and its `this_hash` matches the value
/// recomputed from its own fields. An empty chain is valid.
pub fn verify_chain(events: &[ActivityEvent]) -> bool {
    verify_window(events, 0, ActivityEvent::GENESIS_HASH)
}

/// Verify a contiguous window of a longer chain.
///
/// The first event must carry `first_sequence` and link to `anchor_hash`;
/// every later event follows the same rules as `verify_chain`.
pub fn verify_window<'a, I>(events: I, first_sequence: u64, anchor_hash: &str) -> bool
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    let mut expected_prev = anchor_hash.to_string();
    let mut expected_sequence = first_sequence;

    for event in events {
        if event.sequence != expected_sequence || event.prev_hash != expected_prev {
            return false;
        }

        let recomputed = match hash_event(
            &event.log_id,
            event.sequence,
            &event.record,
            &event.prev_hash,
        ) {
            Ok(hash) => hash,
            Err(_) => return false,
        };
        if event.this_hash != recomputed {
            return false;
        }

        expected_prev = event.this_hash.clone();
        expected_sequence += 1;
    }

    true
}
