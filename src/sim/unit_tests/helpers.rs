use crate::graph::{VertexId, VertexRecord, VertexStore};

/// Build a store from adjacency lists, one per identity in order.
pub fn store_of(adjacency: &[&[VertexId]]) -> VertexStore {
    let records = adjacency
        .iter()
        .enumerate()
        .map(|(identity, neighbors)| VertexRecord {
            identity: identity as VertexId,
            neighbor_ids: neighbors.to_vec(),
        })
        .collect();
    VertexStore::from_records(records).expect("test adjacency must be well-formed")
}

/// Complete graph on `n` vertices, no self-loops.
pub fn complete_graph(n: usize) -> VertexStore {
    let records = (0..n)
        .map(|identity| VertexRecord {
            identity: identity as VertexId,
            neighbor_ids: (0..n)
                .filter(|&other| other != identity)
                .map(|other| other as VertexId)
                .collect(),
        })
        .collect();
    VertexStore::from_records(records).expect("complete graph is well-formed")
}

/// Path graph 0-1-2-...-(n-1).
pub fn path_graph(n: usize) -> VertexStore {
    let records = (0..n)
        .map(|identity| {
            let mut neighbor_ids = Vec::new();
            if identity > 0 {
                neighbor_ids.push((identity - 1) as VertexId);
            }
            if identity + 1 < n {
                neighbor_ids.push((identity + 1) as VertexId);
            }
            VertexRecord {
                identity: identity as VertexId,
                neighbor_ids,
            }
        })
        .collect();
    VertexStore::from_records(records).expect("path graph is well-formed")
}

/// Check that residency flags and working-set membership agree everywhere.
pub fn assert_residency_invariant(store: &VertexStore, members: &[VertexId]) {
    for vertex in store.iter() {
        let in_set = members
            .iter()
            .filter(|&&m| m == vertex.identity())
            .count();
        if vertex.resident() {
            assert_eq!(
                in_set,
                1,
                "resident vertex {} must hold exactly one slot",
                vertex.identity()
            );
        } else {
            assert_eq!(
                in_set,
                0,
                "non-resident vertex {} must hold no slot",
                vertex.identity()
            );
        }
    }
}
