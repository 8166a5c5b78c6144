use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ─────────────────────────────────────────────
// RawRecord
// ─────────────────────────────────────────────

/// One already-parsed tabular row handed in by the ingestion layer.
///
/// Field parsing (CSV splitting, numeric conversion) happens upstream;
/// the store is only responsible for id assignment and converting `date`
/// into the temporal ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Calendar date as `YYYY/MM/DD`.
    pub date: String,
    /// Projected x coordinate.
    pub x: i32,
    /// Projected y coordinate.
    pub y: i32,
    /// Occurrence count carried from the source row.
    pub freq: i32,
    /// Category label carried from the source row.
    pub kind: String,
}

impl RawRecord {
    pub fn new(date: &str, x: i32, y: i32, freq: i32, kind: &str) -> Self {
        Self {
            date: date.to_string(),
            x,
            y,
            freq,
            kind: kind.to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Event
// ─────────────────────────────────────────────

/// One geocoded, time-stamped event. Immutable after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Dense id assigned by the store at ingestion time, starting at 0.
    /// Never reused, never reassigned.
    pub id: u32,

    /// Axes 0 and 1 are spatial (projected x/y); axis 2 is the temporal
    /// ordinal produced by [`temporal_ordinal`].
    pub coord: [i32; 3],

    /// Occurrence count carried from the source record. Not used in
    /// indexing or edge construction.
    pub freq: i32,

    /// Category label carried from the source record. Not used in
    /// indexing or edge construction.
    pub kind: String,
}

/// Convert a `YYYY/MM/DD` date string into the temporal ordinal.
///
/// ordinal = `month0 * 30 + day_of_month`, with a 0-based month and a
/// 1-based day. The 30-day month is an approximation: it miscounts month
/// lengths and collapses year boundaries, but is kept as-is for
/// compatibility with existing reference outputs.
pub fn temporal_ordinal(date: &str) -> Result<i32, ModelError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y/%m/%d")
        .map_err(|_| ModelError::InvalidDate(date.to_string()))?;
    Ok(parsed.month0() as i32 * 30 + parsed.day() as i32)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
