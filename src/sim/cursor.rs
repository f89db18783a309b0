use log::debug;

use crate::error::Result;
use crate::graph::{VertexId, VertexStore};
use crate::sim::working_set::WorkingSet;

/// Circular scan over the vertex store that replenishes the working set
/// after evictions. The scan position survives across rounds; it is never
/// reset to the front of the store.
#[derive(Debug)]
pub struct RefillCursor {
    scan_pos: usize,
}

impl RefillCursor {
    pub fn new(start: usize, store_len: usize) -> Self {
        debug_assert!(store_len > 0);
        RefillCursor {
            scan_pos: start % store_len,
        }
    }

    pub fn position(&self) -> usize {
        self.scan_pos
    }

    /// Scan circularly from the current position, admitting non-resident
    /// vertices that still have edges left, until the working set is full
    /// or the scan has come full circle. Returns the number of simulated
    /// off-chip fetches.
    pub fn refill(&mut self, store: &mut VertexStore, working_set: &mut WorkingSet) -> Result<u64> {
        let len = store.len();
        let start = self.scan_pos;
        let mut fetches = 0u64;

        while !working_set.is_full() {
            let identity = self.scan_pos as VertexId;
            let eligible = {
                let candidate = store.get(identity)?;
                !candidate.resident() && !candidate.exhausted()
            };
            if eligible {
                working_set.admit(store, identity)?;
                fetches += 1;
            }
            self.scan_pos = (self.scan_pos + 1) % len;
            if self.scan_pos == start {
                // full circle; anything still off-chip has no work left
                break;
            }
        }

        debug!(
            "refill fetched {} vertices, cursor now at {}",
            fetches, self.scan_pos
        );
        Ok(fetches)
    }
}
