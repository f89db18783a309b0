use log::{debug, warn};
use smallvec::SmallVec;

use crate::error::Result;
use crate::graph::{VertexId, VertexStore};

/// Result of one edge-processing pass over the working set.
#[derive(Debug, Default)]
pub struct ProcessOutcome {
    pub edges_processed: u64,
    /// Evicted identities, in eviction order.
    pub evicted: Vec<VertexId>,
}

/// The bounded set of buffer-resident vertices. Membership mirrors the
/// per-vertex `resident` flag exactly; the set holds identity indices only,
/// never references into the store.
#[derive(Debug)]
pub struct WorkingSet {
    members: Vec<VertexId>,
    capacity: usize,
}

impl WorkingSet {
    pub fn with_capacity(capacity: usize) -> Self {
        WorkingSet {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn members(&self) -> &[VertexId] {
        &self.members
    }

    /// Make `identity` resident and give it a slot. Callers check capacity
    /// and residency beforehand.
    pub(crate) fn admit(&mut self, store: &mut VertexStore, identity: VertexId) -> Result<()> {
        debug_assert!(!self.is_full(), "admitting into a full working set");
        let vertex = store.get_mut(identity)?;
        debug_assert!(!vertex.resident(), "vertex {} already resident", identity);
        vertex.set_resident(true);
        self.members.push(identity);
        Ok(())
    }

    /// Initial fill: vertices `[0, count)` become resident without being
    /// charged to the refill fetch counter.
    pub(crate) fn seed(&mut self, store: &mut VertexStore, count: usize) -> Result<()> {
        for identity in 0..count {
            self.admit(store, identity as VertexId)?;
        }
        Ok(())
    }

    /// One processing round: attempt every edge of every resident vertex,
    /// removing the edges whose far endpoint is also resident, then evict
    /// the vertices that finished (or nearly finished, per `gamma`).
    ///
    /// Both the member roster and each vertex's adjacency are iterated via
    /// snapshots so that in-flight removals neither skip nor double-visit
    /// entries.
    pub fn process(&mut self, store: &mut VertexStore, gamma: u32) -> Result<ProcessOutcome> {
        let roster: Vec<VertexId> = self.members.clone();
        let mut outcome = ProcessOutcome::default();

        for &vid in &roster {
            // snapshot taken at this vertex's turn: removals made by
            // earlier roster members must already be visible
            let scan: SmallVec<[VertexId; 16]> =
                store.get(vid)?.neighbors().iter().copied().collect();

            for nid in scan {
                if !store.get(nid)?.resident() {
                    // far endpoint is off-chip; the edge is deferred
                    continue;
                }
                if nid != vid {
                    // reciprocal side first; a self-loop must not be
                    // torn down twice
                    let neighbor = store.get_mut(nid)?;
                    neighbor.decrement_degree()?;
                    neighbor.remove_neighbor(vid)?;
                }
                let vertex = store.get_mut(vid)?;
                vertex.decrement_degree()?;
                vertex.remove_neighbor(nid)?;
                outcome.edges_processed += 1;
            }

            let vertex = store.get(vid)?;
            let drained = vertex.exhausted();
            let below_threshold = vertex.remaining_degree() <= gamma;
            if drained || below_threshold {
                if drained != (vertex.remaining_degree() == 0) {
                    warn!(
                        "vertex {} eviction conditions diverge: {} neighbors left, remaining degree {}",
                        vid,
                        vertex.neighbors().len(),
                        vertex.remaining_degree()
                    );
                }
                debug!(
                    "evicting vertex {} (remaining degree {})",
                    vid,
                    vertex.remaining_degree()
                );
                store.get_mut(vid)?.set_resident(false);
                self.members.retain(|&m| m != vid);
                outcome.evicted.push(vid);
            }
        }

        debug_assert!(self.members.len() <= self.capacity);
        Ok(outcome)
    }
}
