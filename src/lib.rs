//! deal-timeline: headless engine for a 12-month deal timeline.
//!
//! Hosts feed pointer gestures and a track width in pixels; the engine snaps
//! them to month cells, keeps every deal's month range valid, and exposes a
//! serializable layout snapshot. Committed ranges can be handed to an async
//! in-memory persistence shim.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod persistence;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
