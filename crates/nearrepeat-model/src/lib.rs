//! # nearrepeat-model
//!
//! Event data model and append-only store for the nearrepeat core.
//!
//! Provides:
//! - [`event::Event`]        — one geocoded, time-stamped record
//! - [`event::RawRecord`]    — the already-parsed tabular row handed in by ingestion
//! - [`store::EventStore`]   — append-only store owning id assignment
//! - [`export`]              — deterministic text interchange (events + sorted edges)
//!
//! The temporal axis is derived from the record's calendar date via
//! [`event::temporal_ordinal`]; spatial axes are copied verbatim.

pub mod error;
pub mod event;
pub mod export;
pub mod store;

pub use error::ModelError;
pub use event::{temporal_ordinal, Event, RawRecord};
pub use export::{write_edges, write_events};
pub use store::EventStore;
