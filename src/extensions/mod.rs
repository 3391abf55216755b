//! Optional hooks layered on top of the engine.
//!
//! Keep extensions observational and avoid coupling them into core paths.

pub mod plugins;

pub use plugins::{TimelineContext, TimelineEvent, TimelinePlugin};
