use crate::error::ModelError;
use crate::event::{temporal_ordinal, Event, RawRecord};

// ─────────────────────────────────────────────
// EventStore
// ─────────────────────────────────────────────

/// Append-only store of ingested events.
///
/// Owns the id counter: ids are dense, assigned in ingestion order starting
/// at 0, and never reused. Events are immutable once stored; downstream
/// consumers (index, edge builder) hold only ids or coordinate copies.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    next_id: u32,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one record: assign the next id, convert the date into the
    /// temporal ordinal, copy the remaining fields verbatim.
    ///
    /// A malformed date fails with [`ModelError::InvalidDate`] before the
    /// store is touched, so no partial record is ever observable.
    ///
    /// Returns the assigned id.
    pub fn ingest(&mut self, record: RawRecord) -> Result<u32, ModelError> {
        let ordinal = temporal_ordinal(&record.date)?;
        let id = self.next_id;
        self.next_id += 1;
        self.events.push(Event {
            id,
            coord: [record.x, record.y, ordinal],
            freq: record.freq,
            kind: record.kind,
        });
        Ok(id)
    }

    /// Ingest a batch of records, all-or-nothing.
    ///
    /// Every date is parsed before anything is appended: on the first
    /// malformed record the whole batch is rejected and the store is left
    /// exactly as it was.
    ///
    /// Returns the number of events ingested.
    pub fn ingest_all<I>(&mut self, records: I) -> Result<usize, ModelError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut staged = Vec::new();
        let mut id = self.next_id;
        for record in records {
            let ordinal = temporal_ordinal(&record.date)?;
            staged.push(Event {
                id,
                coord: [record.x, record.y, ordinal],
                freq: record.freq,
                kind: record.kind,
            });
            id += 1;
        }
        let count = staged.len();
        self.events.extend(staged);
        self.next_id = id;
        Ok(count)
    }

    /// Look up an event by id.
    pub fn get(&self, id: u32) -> Result<&Event, ModelError> {
        self.events
            .get(id as usize)
            .ok_or(ModelError::UnknownId(id))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate events in ingestion (= id) order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
