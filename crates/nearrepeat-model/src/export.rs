//! Deterministic text interchange for events and edge lists.
//!
//! Used for testing and for handing results to external tooling: output is
//! byte-for-byte reproducible across runs of the same build.

use std::io::Write;

use crate::error::ModelError;
use crate::store::EventStore;

/// Write one line per event: `id x|y|z freq kind`.
///
/// Events are written in id order. Returns the number of lines written.
pub fn write_events<W: Write>(store: &EventStore, writer: &mut W) -> Result<usize, ModelError> {
    let mut count = 0;
    for event in store.iter() {
        writeln!(
            writer,
            "{} {}|{}|{} {} {}",
            event.id, event.coord[0], event.coord[1], event.coord[2], event.freq, event.kind,
        )?;
        count += 1;
    }
    Ok(count)
}

/// Write one line per edge: `from to`.
///
/// Edges are sorted lexicographically on `(from, to)` before writing so the
/// output does not depend on the builder's enumeration order. The input
/// slice is left untouched. Returns the number of lines written.
pub fn write_edges<W: Write>(edges: &[(u32, u32)], writer: &mut W) -> Result<usize, ModelError> {
    let mut sorted = edges.to_vec();
    sorted.sort_unstable();
    for (from, to) in &sorted {
        writeln!(writer, "{from} {to}")?;
    }
    Ok(sorted.len())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
