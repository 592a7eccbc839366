//! The shared view snapshot and its reducer-style update entry point.
//!
//! The snapshot is owned explicitly and updated through whole-field patches:
//! each load phase commits one patch that wholesale-replaces exactly the
//! fields it produced. Nothing here is ever persisted.

use crate::models::{Announcement, GlobalStatus, Region};
use crate::payload::RegionCatalogEntry;
use crate::status::Status;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Latest successfully merged snapshot of everything the page renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    /// Bumped on every applied patch; lets collaborators detect staleness.
    pub version: u64,
    pub global: GlobalStatus,
    pub regions: Vec<Region>,
    pub region_catalog: Vec<RegionCatalogEntry>,
    /// Per-region daily status strips, keyed by region name.
    pub uptime_history: HashMap<String, Vec<Status>>,
    /// Latency matrix: hub region to destination region, milliseconds.
    pub latency: HashMap<String, HashMap<String, f64>>,
    pub latency_hub: String,
    pub announcements: Vec<Announcement>,
    pub incident_feed: Vec<Announcement>,
}

/// Whole-field patch: `Some` replaces the field wholesale, `None` leaves it
/// untouched. There is deliberately no finer-grained mutation.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub global: Option<GlobalStatus>,
    pub regions: Option<Vec<Region>>,
    pub region_catalog: Option<Vec<RegionCatalogEntry>>,
    pub uptime_history: Option<HashMap<String, Vec<Status>>>,
    pub latency: Option<HashMap<String, HashMap<String, f64>>>,
    pub latency_hub: Option<String>,
    pub announcements: Option<Vec<Announcement>>,
    pub incident_feed: Option<Vec<Announcement>>,
}

impl ViewState {
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(global) = patch.global {
            self.global = global;
        }
        if let Some(regions) = patch.regions {
            self.regions = regions;
        }
        if let Some(region_catalog) = patch.region_catalog {
            self.region_catalog = region_catalog;
        }
        if let Some(uptime_history) = patch.uptime_history {
            self.uptime_history = uptime_history;
        }
        if let Some(latency) = patch.latency {
            self.latency = latency;
        }
        if let Some(latency_hub) = patch.latency_hub {
            self.latency_hub = latency_hub;
        }
        if let Some(announcements) = patch.announcements {
            self.announcements = announcements;
        }
        if let Some(incident_feed) = patch.incident_feed {
            self.incident_feed = incident_feed;
        }
        self.version = self.version.wrapping_add(1);
    }
}

/// Shared handle over the snapshot: the load orchestrator is the single
/// writer, render collaborators read cloned snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<ViewState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, patch: StatePatch) {
        if let Ok(mut state) = self.inner.write() {
            state.apply(patch);
        }
    }

    pub fn snapshot(&self) -> ViewState {
        match self.inner.read() {
            Ok(state) => state.clone(),
            Err(_) => ViewState::default(),
        }
    }

    pub fn version(&self) -> u64 {
        match self.inner.read() {
            Ok(state) => state.version,
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_bumps_version_and_replaces_only_patched_fields() {
        let mut state = ViewState::default();
        state.apply(StatePatch {
            latency_hub: Some("EU".to_owned()),
            ..StatePatch::default()
        });
        assert_eq!(state.version, 1);
        assert_eq!(state.latency_hub, "EU");

        state.apply(StatePatch {
            announcements: Some(vec![Announcement::default()]),
            ..StatePatch::default()
        });
        assert_eq!(state.version, 2);
        // untouched field survives the second patch
        assert_eq!(state.latency_hub, "EU");
        assert_eq!(state.announcements.len(), 1);
    }

    #[test]
    fn empty_patch_still_bumps_version() {
        let mut state = ViewState::default();
        state.apply(StatePatch::default());
        assert_eq!(state.version, 1);
    }

    #[test]
    fn shared_state_snapshots_are_decoupled_copies() {
        let shared = SharedState::new();
        let before = shared.snapshot();

        shared.apply(StatePatch {
            latency_hub: Some("EU".to_owned()),
            ..StatePatch::default()
        });

        assert_eq!(before.version, 0);
        assert!(before.latency_hub.is_empty());

        let after = shared.snapshot();
        assert_eq!(after.version, 1);
        assert_eq!(after.latency_hub, "EU");
        assert_eq!(shared.version(), 1);
    }
}
