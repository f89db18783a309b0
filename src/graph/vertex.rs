use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::graph::VertexId;

/// One entry of the input dataset, as serialized by the graph
/// preprocessing stage.
#[derive(Debug, Clone, Deserialize)]
pub struct VertexRecord {
    pub identity: VertexId,
    pub neighbor_ids: Vec<VertexId>,
}

/// Per-vertex simulation state.
///
/// `remaining_degree` tracks `neighbors.len()` at load time but is
/// decremented independently per removed edge; the two can legitimately
/// diverge when an edge is torn down on one side only (non-resident
/// neighbor), so neither is derived from the other.
#[derive(Debug, Clone)]
pub struct Vertex {
    identity: VertexId,
    neighbors: Vec<VertexId>,
    remaining_degree: u32,
    resident: bool,
}

impl Vertex {
    pub(crate) fn from_record(record: VertexRecord) -> Self {
        let remaining_degree = record.neighbor_ids.len() as u32;
        Vertex {
            identity: record.identity,
            neighbors: record.neighbor_ids,
            remaining_degree,
            resident: false,
        }
    }

    pub fn identity(&self) -> VertexId {
        self.identity
    }

    pub fn neighbors(&self) -> &[VertexId] {
        &self.neighbors
    }

    pub fn remaining_degree(&self) -> u32 {
        self.remaining_degree
    }

    pub fn resident(&self) -> bool {
        self.resident
    }

    /// Whether the adjacency list has been fully consumed.
    pub fn exhausted(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub(crate) fn set_resident(&mut self, resident: bool) {
        self.resident = resident;
    }

    /// Remove a single occurrence of `other` from the adjacency list.
    pub(crate) fn remove_neighbor(&mut self, other: VertexId) -> Result<()> {
        match self.neighbors.iter().position(|&n| n == other) {
            Some(idx) => {
                self.neighbors.remove(idx);
                Ok(())
            }
            None => Err(SimError::InconsistentState {
                reason: format!(
                    "vertex {} holds no edge back to vertex {}",
                    self.identity, other
                ),
            }),
        }
    }

    pub(crate) fn decrement_degree(&mut self) -> Result<()> {
        self.remaining_degree =
            self.remaining_degree
                .checked_sub(1)
                .ok_or_else(|| SimError::InconsistentState {
                    reason: format!("remaining degree of vertex {} underflowed", self.identity),
                })?;
        Ok(())
    }
}
