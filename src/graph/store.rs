use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Result, SimError};
use crate::graph::vertex::{Vertex, VertexRecord};
use crate::graph::VertexId;

/// Arena of all vertices, modeling the off-chip copy of the graph. Created
/// once at load time and never resized; everything else addresses vertices
/// through their identity index.
#[derive(Debug)]
pub struct VertexStore {
    vertices: Vec<Vertex>,
}

impl VertexStore {
    pub fn load_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SimError::MalformedInput {
            reason: format!("cannot open vertex dataset {:?}: {}", path, e),
        })?;
        Self::load_reader(BufReader::new(file))
    }

    pub fn load_reader(reader: impl Read) -> Result<Self> {
        let records: Vec<VertexRecord> =
            serde_json::from_reader(reader).map_err(|e| SimError::MalformedInput {
                reason: format!("cannot parse vertex records: {}", e),
            })?;
        Self::from_records(records)
    }

    /// Build the store from already-deserialized records. Identities must
    /// form exactly `[0, V)`; order of the records does not matter.
    pub fn from_records(records: Vec<VertexRecord>) -> Result<Self> {
        let len = records.len();
        let mut slots: Vec<Option<Vertex>> = (0..len).map(|_| None).collect();
        for record in records {
            let idx = record.identity as usize;
            if idx >= len {
                return Err(SimError::IndexOutOfRange {
                    identity: record.identity,
                    len,
                });
            }
            if slots[idx].is_some() {
                return Err(SimError::MalformedInput {
                    reason: format!("duplicate vertex identity {}", record.identity),
                });
            }
            slots[idx] = Some(Vertex::from_record(record));
        }
        // every slot is filled: len records, unique, all below len
        let vertices: Vec<Vertex> = slots.into_iter().flatten().collect();
        debug_assert_eq!(vertices.len(), len);
        Ok(VertexStore { vertices })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn get(&self, identity: VertexId) -> Result<&Vertex> {
        self.vertices
            .get(identity as usize)
            .ok_or(SimError::IndexOutOfRange {
                identity,
                len: self.vertices.len(),
            })
    }

    pub fn get_mut(&mut self, identity: VertexId) -> Result<&mut Vertex> {
        let len = self.vertices.len();
        self.vertices
            .get_mut(identity as usize)
            .ok_or(SimError::IndexOutOfRange { identity, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Convergence check: every adjacency list fully consumed.
    pub fn all_consumed(&self) -> bool {
        self.vertices.iter().all(Vertex::exhausted)
    }

    /// Number of vertices whose remaining degree has reached zero.
    pub fn fully_processed_count(&self) -> usize {
        self.vertices
            .iter()
            .filter(|v| v.remaining_degree() == 0)
            .count()
    }
}
