//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without storage concerns:
//!
//! - [`Link`] - A shortened URL mapping
//! - [`ClickEvent`] - A click recorded for a link
//! - [`StatsSnapshot`] - Derived aggregate analytics
//!
//! Creation inputs use separate `New*` structs (`NewLink`, `NewClick`); the
//! store fills in ids and timestamps.

pub mod click;
pub mod link;
pub mod stats;

pub use click::{ClickEvent, NewClick};
pub use link::{Link, NewLink};
pub use stats::{DeviceBreakdown, StatsSnapshot};
