//! Snowflake-style ID generation.
//!
//! 64-bit IDs composed of a millisecond timestamp, a worker id, and a
//! per-millisecond sequence. Time-ordered, unique within a worker, and
//! unique across workers as long as worker ids are distinct. A single
//! process-wide generator is initialized once at startup.

use std::sync::{Mutex, OnceLock};

use chrono::Utc;
use skilldir_types::error::{Error, Result};

/// Custom epoch (2023-11-14T22:13:20Z) to keep IDs small
const EPOCH_MILLIS: i64 = 1_700_000_000_000;

/// Bits allocated to the worker id
const WORKER_BITS: u8 = 10;

/// Bits allocated to the per-millisecond sequence
const SEQUENCE_BITS: u8 = 12;

/// Maximum worker id (inclusive)
pub const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

static GENERATOR: OnceLock<IdGenerator> = OnceLock::new();

/// Process-wide Snowflake ID generator
pub struct IdGenerator {
    worker_id: u16,
    state: Mutex<State>,
}

struct State {
    last_millis: i64,
    sequence: u16,
}

impl IdGenerator {
    /// Initialize the process-wide generator with a worker id
    ///
    /// Returns an error when the worker id is out of range or the generator
    /// was already initialized with a different worker id.
    pub fn init(worker_id: u16) -> Result<()> {
        if worker_id > MAX_WORKER_ID {
            return Err(Error::config(format!(
                "Worker id {worker_id} exceeds maximum {MAX_WORKER_ID}"
            )));
        }

        let generator = GENERATOR.get_or_init(|| IdGenerator {
            worker_id,
            state: Mutex::new(State { last_millis: 0, sequence: 0 }),
        });

        if generator.worker_id != worker_id {
            return Err(Error::config(format!(
                "ID generator already initialized with worker id {}",
                generator.worker_id
            )));
        }
        Ok(())
    }

    /// Generate the next ID
    ///
    /// Falls back to worker id 0 when `init` was never called (tests,
    /// tooling); production startup always initializes explicitly.
    pub fn next_id() -> i64 {
        let generator = GENERATOR.get_or_init(|| IdGenerator {
            worker_id: 0,
            state: Mutex::new(State { last_millis: 0, sequence: 0 }),
        });
        generator.next()
    }

    fn next(&self) -> i64 {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Never move backwards: a clock step back reuses the last observed
        // millisecond and burns sequence numbers instead.
        let mut now = Utc::now().timestamp_millis().max(state.last_millis);

        if now == state.last_millis {
            if state.sequence == MAX_SEQUENCE {
                // Sequence exhausted for this millisecond; wait for the next
                while now <= state.last_millis {
                    now = Utc::now().timestamp_millis();
                }
                state.sequence = 0;
            } else {
                state.sequence += 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_millis = now;

        ((now - EPOCH_MILLIS) << (WORKER_BITS + SEQUENCE_BITS))
            | ((self.worker_id as i64) << SEQUENCE_BITS)
            | (state.sequence as i64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_init_rejects_out_of_range_worker() {
        assert!(IdGenerator::init(MAX_WORKER_ID + 1).is_err());
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let _ = IdGenerator::init(0);

        let ids: Vec<i64> = (0..10_000).map(|_| IdGenerator::next_id()).collect();

        let unique: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_ids_are_positive() {
        let id = IdGenerator::next_id();
        assert!(id > 0);
    }
}
