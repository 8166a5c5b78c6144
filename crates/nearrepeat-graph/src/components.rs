//! Connected-component grouping over a flat edge list, with per-component
//! local vertex renumbering.

use std::collections::HashMap;

use tracing::info;

use crate::builder::{Edge, EdgeList};
use crate::error::GraphError;

// ─────────────────────────────────────────────
// Union-Find
// ─────────────────────────────────────────────

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]); // path compression
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        // union by rank
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }
}

// ─────────────────────────────────────────────
// Grouping
// ─────────────────────────────────────────────

/// Partition `edges` into per-connected-component edge lists, remapping
/// each component's endpoints to dense local ids `0..k` in first-seen
/// order over that component's edges.
///
/// Groups are keyed by union-find root through an explicit map, so the
/// result is correct under any edge ordering; contiguity of a component's
/// edges in the input is not assumed. Groups appear in order of first
/// appearance in the edge list, and within a group edges keep their input
/// order.
///
/// Vertices touched by no edge produce no group. An endpoint
/// `>= node_count` fails with [`GraphError::NodeOutOfBounds`] before any
/// output is produced.
pub fn group_components(edges: &[Edge], node_count: usize) -> Result<Vec<EdgeList>, GraphError> {
    for &(from, to) in edges {
        for id in [from, to] {
            if id as usize >= node_count {
                return Err(GraphError::NodeOutOfBounds {
                    id,
                    len: node_count,
                });
            }
        }
    }

    let mut uf = UnionFind::new(node_count);
    for &(from, to) in edges {
        uf.union(from as usize, to as usize);
    }

    // root → position in `groups`
    let mut group_of: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<EdgeList> = Vec::new();
    // per group: global id → local id, assigned in first-seen order
    let mut local_ids: Vec<HashMap<u32, u32>> = Vec::new();

    for &(from, to) in edges {
        let root = uf.find(from as usize);
        let g = *group_of.entry(root).or_insert_with(|| {
            groups.push(EdgeList::new());
            local_ids.push(HashMap::new());
            groups.len() - 1
        });

        let locals = &mut local_ids[g];
        let next = locals.len() as u32;
        let lf = *locals.entry(from).or_insert(next);
        let next = locals.len() as u32;
        let lt = *locals.entry(to).or_insert(next);
        groups[g].push((lf, lt));
    }

    info!(
        edges = edges.len(),
        components = groups.len(),
        "grouped edges by connected component"
    );
    Ok(groups)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
