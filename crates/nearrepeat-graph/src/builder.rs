//! Proximity edge construction: one symmetric range query per event.

use nearrepeat_index::PointIndex;
use nearrepeat_model::EventStore;
use tracing::info;

use crate::error::GraphError;

/// A directed edge between two event ids.
pub type Edge = (u32, u32);

/// A flat ordered edge list. An undirected connection appears as both
/// orderings.
pub type EdgeList = Vec<Edge>;

/// Build the proximity edge list for `store` against an index built from
/// the same events.
///
/// For every event `n` in store order, queries the closed box
/// `n.coord ± (x_gap, y_gap, z_gap)` and, for every returned id `m` with
/// `m > n.id`, appends both `(n.id, m)` and `(m, n.id)`.
///
/// The box is symmetric around `n`, so if `m` falls in `n`'s box then `n`
/// falls in `m`'s box; the strict `m > n.id` filter therefore visits each
/// unordered pair exactly once and never produces a self-edge. No dedup
/// pass runs afterwards.
///
/// Fails with [`GraphError::NegativeGap`] if any gap is negative.
pub fn build_edges(
    store: &EventStore,
    index: &PointIndex,
    x_gap: i32,
    y_gap: i32,
    z_gap: i32,
) -> Result<EdgeList, GraphError> {
    let gaps = [x_gap, y_gap, z_gap];
    for (axis, &gap) in gaps.iter().enumerate() {
        if gap < 0 {
            return Err(GraphError::NegativeGap { axis, gap });
        }
    }

    let mut edges = EdgeList::new();
    for event in store.iter() {
        let mut min = [0i32; 3];
        let mut max = [0i32; 3];
        for k in 0..3 {
            min[k] = event.coord[k].saturating_sub(gaps[k]);
            max[k] = event.coord[k].saturating_add(gaps[k]);
        }

        for m in index.query_ids(min, max)? {
            if m > event.id {
                edges.push((event.id, m));
                edges.push((m, event.id));
            }
        }
    }

    info!(
        events = store.len(),
        edges = edges.len(),
        x_gap,
        y_gap,
        z_gap,
        "built proximity edges"
    );
    Ok(edges)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
