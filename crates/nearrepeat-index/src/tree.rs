//! Packed R-tree over 3-D integer points, bulk-loaded once with STR
//! (sort-tile-recursive) and read-only afterwards.
//!
//! The tree is a flat `Vec` node pool: leaves hold `(id, point)` entries,
//! branches hold child indices, every node carries its bounds and subtree
//! entry count. There is no incremental insert or delete; the population
//! is a static snapshot by construction.

use tracing::debug;

use crate::aabb::Aabb;
use crate::error::IndexError;

/// Fan-out for both leaves and branches.
const MAX_ENTRIES: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: u32,
    point: [i32; 3],
}

#[derive(Debug)]
enum NodeKind {
    Leaf { entries: Vec<Entry> },
    Branch { children: Vec<usize> },
}

#[derive(Debug)]
struct Node {
    bounds: Aabb,
    /// Number of entries in this subtree.
    count: usize,
    kind: NodeKind,
}

// ─────────────────────────────────────────────
// PointIndex
// ─────────────────────────────────────────────

/// 3-D range-queryable index over `(id, point)` pairs.
///
/// Built exactly once from the full population via [`PointIndex::bulk_load`];
/// all queries take `&self`, so a built index is freely shareable read-only.
/// Each point is inserted as a degenerate box (identical min/max).
#[derive(Debug)]
pub struct PointIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
    len: usize,
}

impl PointIndex {
    /// Build the index from all `(id, point)` pairs using STR packing:
    /// sort by x into slabs, each slab by y into runs, each run by z into
    /// leaves, then pack parent levels over the spatially ordered children.
    ///
    /// Ties sort by id, so the resulting structure (and therefore every
    /// query's result order) is deterministic for a given population.
    pub fn bulk_load(entries: &[(u32, [i32; 3])]) -> Self {
        let mut index = Self {
            nodes: Vec::new(),
            root: None,
            len: entries.len(),
        };
        if entries.is_empty() {
            return index;
        }

        let mut points: Vec<Entry> = entries
            .iter()
            .map(|&(id, point)| Entry { id, point })
            .collect();

        let leaves = index.pack_leaves(&mut points);
        let root = index.pack_upward(leaves);
        index.root = Some(root);
        debug!(
            points = index.len,
            nodes = index.nodes.len(),
            "bulk-loaded point index"
        );
        index
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ids of all points inside the closed box `[min, max]`.
    ///
    /// Result order is unspecified but stable for a given build. Fails
    /// with [`IndexError::InvalidRange`] if `min[k] > max[k]` on any axis;
    /// degenerate (zero-width) ranges are valid.
    pub fn query_ids(&self, min: [i32; 3], max: [i32; 3]) -> Result<Vec<u32>, IndexError> {
        let query = validate(min, max)?;
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return Ok(out);
        };

        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !query.intersects(&node.bounds) {
                continue;
            }
            match &node.kind {
                NodeKind::Leaf { entries } => {
                    for entry in entries {
                        if query.contains_point(entry.point) {
                            out.push(entry.id);
                        }
                    }
                }
                NodeKind::Branch { children } => {
                    stack.extend(children.iter().rev().copied());
                }
            }
        }
        Ok(out)
    }

    /// Number of points inside the closed box `[min, max]`.
    ///
    /// Same predicate as [`PointIndex::query_ids`] without materializing
    /// the id list: subtrees whose bounds lie entirely inside the query
    /// box contribute their stored counts without being descended.
    pub fn query_count(&self, min: [i32; 3], max: [i32; 3]) -> Result<usize, IndexError> {
        let query = validate(min, max)?;
        let Some(root) = self.root else {
            return Ok(0);
        };

        let mut count = 0;
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !query.intersects(&node.bounds) {
                continue;
            }
            if query.contains(&node.bounds) {
                count += node.count;
                continue;
            }
            match &node.kind {
                NodeKind::Leaf { entries } => {
                    count += entries
                        .iter()
                        .filter(|e| query.contains_point(e.point))
                        .count();
                }
                NodeKind::Branch { children } => {
                    stack.extend(children.iter().copied());
                }
            }
        }
        Ok(count)
    }

    // ── Construction internals ─────────────────────────

    /// STR leaf packing: x-slabs, then y-runs, then z-sorted leaf chunks.
    /// Returns the node indices of the packed leaves in spatial order.
    fn pack_leaves(&mut self, points: &mut [Entry]) -> Vec<usize> {
        let leaf_count = points.len().div_ceil(MAX_ENTRIES);
        let tiles = (leaf_count as f64).cbrt().ceil() as usize;
        let tiles = tiles.max(1);

        points.sort_unstable_by_key(|e| (e.point[0], e.point[1], e.point[2], e.id));
        let slab_len = points.len().div_ceil(tiles);

        let mut leaves = Vec::with_capacity(leaf_count);
        for slab in points.chunks_mut(slab_len) {
            slab.sort_unstable_by_key(|e| (e.point[1], e.point[2], e.id));
            let run_len = slab.len().div_ceil(tiles);
            for run in slab.chunks_mut(run_len) {
                run.sort_unstable_by_key(|e| (e.point[2], e.id));
                for chunk in run.chunks(MAX_ENTRIES) {
                    leaves.push(self.push_leaf(chunk));
                }
            }
        }
        leaves
    }

    /// Pack parent levels over spatially ordered children until a single
    /// root remains.
    fn pack_upward(&mut self, mut level: Vec<usize>) -> usize {
        while level.len() > 1 {
            let mut parents = Vec::with_capacity(level.len().div_ceil(MAX_ENTRIES));
            for group in level.chunks(MAX_ENTRIES) {
                parents.push(self.push_branch(group));
            }
            level = parents;
        }
        level[0]
    }

    fn push_leaf(&mut self, entries: &[Entry]) -> usize {
        let mut bounds = Aabb::point(entries[0].point);
        for entry in &entries[1..] {
            bounds = bounds.union(&Aabb::point(entry.point));
        }
        self.nodes.push(Node {
            bounds,
            count: entries.len(),
            kind: NodeKind::Leaf {
                entries: entries.to_vec(),
            },
        });
        self.nodes.len() - 1
    }

    fn push_branch(&mut self, children: &[usize]) -> usize {
        let mut bounds = self.nodes[children[0]].bounds;
        let mut count = 0;
        for &child in children {
            bounds = bounds.union(&self.nodes[child].bounds);
            count += self.nodes[child].count;
        }
        self.nodes.push(Node {
            bounds,
            count,
            kind: NodeKind::Branch {
                children: children.to_vec(),
            },
        });
        self.nodes.len() - 1
    }
}

fn validate(min: [i32; 3], max: [i32; 3]) -> Result<Aabb, IndexError> {
    for axis in 0..3 {
        if min[axis] > max[axis] {
            return Err(IndexError::InvalidRange {
                axis,
                min: min[axis],
                max: max[axis],
            });
        }
    }
    Ok(Aabb::new(min, max))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-force reference for cross-checking tree queries.
    fn brute_force(entries: &[(u32, [i32; 3])], min: [i32; 3], max: [i32; 3]) -> Vec<u32> {
        let query = Aabb::new(min, max);
        entries
            .iter()
            .filter(|(_, p)| query.contains_point(*p))
            .map(|(id, _)| *id)
            .collect()
    }

    /// A 5x5x5 grid: 125 points, enough for a multi-level tree.
    fn grid() -> Vec<(u32, [i32; 3])> {
        let mut entries = Vec::new();
        let mut id = 0;
        for x in 0..5 {
            for y in 0..5 {
                for z in 0..5 {
                    entries.push((id, [x * 10, y * 10, z * 10]));
                    id += 1;
                }
            }
        }
        entries
    }

    #[test]
    fn empty_index_answers_everything_with_nothing() {
        let index = PointIndex::bulk_load(&[]);
        assert!(index.is_empty());
        assert!(index.query_ids([-100, -100, -100], [100, 100, 100]).unwrap().is_empty());
        assert_eq!(index.query_count([0, 0, 0], [0, 0, 0]).unwrap(), 0);
    }

    #[test]
    fn single_point_exact_and_near_miss() {
        let index = PointIndex::bulk_load(&[(7, [3, 4, 5])]);
        assert_eq!(index.query_ids([3, 4, 5], [3, 4, 5]).unwrap(), vec![7]);
        assert!(index.query_ids([3, 4, 6], [3, 4, 6]).unwrap().is_empty());
        assert!(index.query_ids([4, 4, 5], [10, 10, 10]).unwrap().is_empty());
    }

    #[test]
    fn bounds_are_inclusive_on_every_axis() {
        let index = PointIndex::bulk_load(&[(0, [0, 0, 0]), (1, [10, 10, 10])]);
        // Query box whose corners exactly touch the two points.
        let mut ids = index.query_ids([0, 0, 0], [10, 10, 10]).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1]);
        // Shrinking any axis by one drops the far corner.
        assert_eq!(index.query_ids([0, 0, 0], [10, 10, 9]).unwrap(), vec![0]);
        assert_eq!(index.query_ids([0, 0, 0], [9, 10, 10]).unwrap(), vec![0]);
    }

    #[test]
    fn invalid_range_is_rejected_per_axis() {
        let index = PointIndex::bulk_load(&[(0, [0, 0, 0])]);
        let err = index.query_ids([0, 5, 0], [10, 4, 10]).unwrap_err();
        assert_eq!(
            err,
            IndexError::InvalidRange { axis: 1, min: 5, max: 4 }
        );
        let err = index.query_count([1, 0, 0], [0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            IndexError::InvalidRange { axis: 0, min: 1, max: 0 }
        );
    }

    #[test]
    fn duplicate_coordinates_are_all_returned() {
        let entries = vec![(0, [1, 1, 1]), (1, [1, 1, 1]), (2, [1, 1, 1]), (3, [2, 2, 2])];
        let index = PointIndex::bulk_load(&entries);
        let mut ids = index.query_ids([1, 1, 1], [1, 1, 1]).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(index.query_count([1, 1, 1], [1, 1, 1]).unwrap(), 3);
    }

    #[test]
    fn grid_queries_match_brute_force() {
        let entries = grid();
        let index = PointIndex::bulk_load(&entries);
        let boxes = [
            ([0, 0, 0], [40, 40, 40]),   // everything
            ([5, 5, 5], [25, 25, 25]),   // interior block
            ([0, 0, 0], [0, 0, 0]),      // degenerate corner
            ([-50, -50, -50], [-1, -1, -1]), // fully outside
            ([10, 0, 30], [10, 40, 30]), // a plane slice
            ([38, 38, 38], [60, 60, 60]), // overlaps far corner
        ];
        for (min, max) in boxes {
            let mut got = index.query_ids(min, max).unwrap();
            let mut want = brute_force(&entries, min, max);
            got.sort_unstable();
            want.sort_unstable();
            assert_eq!(got, want, "ids mismatch for box {min:?}..{max:?}");
            assert_eq!(
                index.query_count(min, max).unwrap(),
                want.len(),
                "count mismatch for box {min:?}..{max:?}"
            );
        }
    }

    #[test]
    fn count_equals_ids_len_always() {
        let entries = grid();
        let index = PointIndex::bulk_load(&entries);
        for min_x in [-10, 0, 15] {
            for max_x in [15, 40, 55] {
                let min = [min_x, -10, 5];
                let max = [max_x, 35, 45];
                let ids = index.query_ids(min, max).unwrap();
                assert_eq!(index.query_count(min, max).unwrap(), ids.len());
            }
        }
    }

    #[test]
    fn result_order_is_stable_per_build() {
        let entries = grid();
        let a = PointIndex::bulk_load(&entries);
        let b = PointIndex::bulk_load(&entries);
        let query = ([0, 0, 0], [40, 40, 40]);
        let first = a.query_ids(query.0, query.1).unwrap();
        // Same build queried twice and an identical build both agree exactly.
        assert_eq!(first, a.query_ids(query.0, query.1).unwrap());
        assert_eq!(first, b.query_ids(query.0, query.1).unwrap());
    }

    #[test]
    fn skewed_population_still_answers_exactly() {
        // 1000 collinear points stress slab/run splitting.
        let entries: Vec<(u32, [i32; 3])> =
            (0..1000).map(|i| (i, [i as i32, 0, 0])).collect();
        let index = PointIndex::bulk_load(&entries);
        assert_eq!(index.query_count([0, 0, 0], [999, 0, 0]).unwrap(), 1000);
        let ids = index.query_ids([250, 0, 0], [259, 0, 0]).unwrap();
        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|&id| (250..=259).contains(&id)));
        assert_eq!(index.query_count([250, -5, -5], [259, 5, 5]).unwrap(), 10);
    }

    #[test]
    fn negative_coordinates_work() {
        let entries = vec![(0, [-10, -20, -30]), (1, [-5, -5, -5]), (2, [0, 0, 0])];
        let index = PointIndex::bulk_load(&entries);
        let mut ids = index.query_ids([-15, -25, -35], [-4, -4, -4]).unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1]);
    }
}
