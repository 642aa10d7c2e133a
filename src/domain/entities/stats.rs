//! Derived analytics snapshot.

use serde::Serialize;
use std::collections::HashMap;

/// Click counts per device category.
///
/// Only the three known categories are tracked; click events carrying any
/// other device string are dropped from the breakdown rather than grouped
/// into an "other" bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceBreakdown {
    pub mobile: i64,
    pub desktop: i64,
    pub tablet: i64,
}

/// Aggregate statistics over all links and click events.
///
/// Derived on demand by [`crate::domain::store::LinkStore::compute_stats`];
/// never stored or cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_clicks: i64,
    pub total_links: i64,
    /// Links that are active and either have no expiry or expire strictly
    /// after the moment of evaluation.
    pub active_links: i64,
    pub devices: DeviceBreakdown,
    /// Referrer histogram; `"direct"` is the catch-all for empty referrers
    /// (normalized at write time, so empty keys never occur here).
    pub referrers: HashMap<String, i64>,
}
