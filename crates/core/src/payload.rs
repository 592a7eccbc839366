//! Wire shapes of the public status API.
//!
//! Every field is defaulted so a partial or malformed payload coerces to
//! empty collections instead of failing the decode; the mapper applies the
//! remaining fallbacks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Primary payload from `GET /api/status/{slug}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub overall_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub groups: Vec<RawGroup>,
    #[serde(default)]
    pub ungrouped: Vec<RawService>,
    #[serde(default)]
    pub announcements: Vec<RawAnnouncement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aggregate_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub aggregate_uptime: Option<f64>,
    #[serde(default)]
    pub aggregate_uptime_blocks: Vec<Option<f64>>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub services: Vec<RawService>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawService {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub uptime_blocks: Vec<Option<f64>>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub latency: Option<f64>,
}

/// Announcement as it appears on the wire, in both the inline payload and
/// the incident feed. Region incident/maintenance items reuse this shape
/// with the `region` field set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnouncement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub label_ids: Vec<String>,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// Entry of the region catalog (`GET /api/status/regions` and
/// `GET /api/status/{slug}/regions`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionCatalogEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionsResponse {
    #[serde(default)]
    pub regions: Vec<RegionCatalogEntry>,
}

/// Per-region historical uptime blocks, keyed by region name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UptimeResponse {
    #[serde(default)]
    pub regions: HashMap<String, Vec<Option<f64>>>,
}

/// Latency matrix between regions. `hub` is the reference region whose row
/// of peer latencies the page reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatencyResponse {
    #[serde(default)]
    pub matrix: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub hub: String,
}

/// The incident feed arrives either as a bare array or wrapped in an
/// `incidents` or `announcements` key depending on the upstream version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IncidentFeed {
    Items(Vec<RawAnnouncement>),
    Incidents {
        incidents: Vec<RawAnnouncement>,
    },
    Announcements {
        announcements: Vec<RawAnnouncement>,
    },
}

impl IncidentFeed {
    pub fn into_items(self) -> Vec<RawAnnouncement> {
        match self {
            IncidentFeed::Items(items) => items,
            IncidentFeed::Incidents { incidents } => incidents,
            IncidentFeed::Announcements { announcements } => announcements,
        }
    }
}
