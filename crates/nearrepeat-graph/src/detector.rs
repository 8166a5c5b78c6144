//! The near-repeat detector: event store + spatial-temporal index behind
//! one query surface.

use nearrepeat_index::PointIndex;
use nearrepeat_model::EventStore;
use tracing::info;

use crate::builder::{build_edges, EdgeList};
use crate::components::group_components;
use crate::error::GraphError;

/// Owns an [`EventStore`] and the [`PointIndex`] built once from it, and
/// exposes the full detection pipeline: range queries, proximity edge
/// construction, and connected-component extraction.
///
/// The index is populated from the store at construction time (every
/// event's coordinate inserted as a degenerate box) and never changes;
/// all operations afterwards take `&self`.
#[derive(Debug)]
pub struct NearRepeatDetector {
    store: EventStore,
    index: PointIndex,
}

impl NearRepeatDetector {
    /// Build the detector over a fully ingested store.
    pub fn new(store: EventStore) -> Self {
        let entries: Vec<(u32, [i32; 3])> = store.iter().map(|e| (e.id, e.coord)).collect();
        let index = PointIndex::bulk_load(&entries);
        info!(events = store.len(), "indexed event snapshot");
        Self { store, index }
    }

    /// Ids of all events inside the closed box `[min, max]`.
    pub fn query_ids(&self, min: [i32; 3], max: [i32; 3]) -> Result<Vec<u32>, GraphError> {
        Ok(self.index.query_ids(min, max)?)
    }

    /// Number of events inside the closed box `[min, max]`.
    pub fn query_count(&self, min: [i32; 3], max: [i32; 3]) -> Result<usize, GraphError> {
        Ok(self.index.query_count(min, max)?)
    }

    /// Proximity edges for the given per-axis gaps (see
    /// [`crate::builder::build_edges`]).
    pub fn build_edges(&self, x_gap: i32, y_gap: i32, z_gap: i32) -> Result<EdgeList, GraphError> {
        build_edges(&self.store, &self.index, x_gap, y_gap, z_gap)
    }

    /// Proximity edges grouped by connected component, each component
    /// renumbered to dense local ids (see
    /// [`crate::components::group_components`]).
    pub fn components(&self, x_gap: i32, y_gap: i32, z_gap: i32) -> Result<Vec<EdgeList>, GraphError> {
        let edges = self.build_edges(x_gap, y_gap, z_gap)?;
        group_components(&edges, self.store.len())
    }

    /// The underlying store, for export and downstream consumers.
    pub fn store(&self) -> &EventStore {
        &self.store
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
