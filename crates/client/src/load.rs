//! Phased load orchestration.
//!
//! Phase 1 is the critical path: the primary payload must arrive or the
//! whole cycle fails and the caller falls back to its offline view. Phase 2
//! enriches the snapshot from the auxiliary endpoints and is best-effort
//! throughout — every failure degrades to an empty or previous value and is
//! logged, never surfaced to the cycle.

use crate::api::{ApiError, StatusApi};
use crate::fetch::{FetchError, Transport};
use statuswatch_core::mapper;
use statuswatch_core::models::{Announcement, GlobalStatus};
use statuswatch_core::reconcile::merge_announcements;
use statuswatch_core::state::{SharedState, StatePatch, ViewState};
use statuswatch_core::status::{self, Status};
use std::collections::HashMap;
use std::time::{Instant, SystemTime};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("primary status payload unavailable: {0}")]
    Primary(#[from] ApiError),
    #[error("http client unavailable: {0}")]
    Client(#[from] FetchError),
}

/// Render collaborators, registered at construction rather than discovered
/// ambiently. Phase 1 triggers the first paint; phase 2 re-renders with the
/// enrichment data.
pub trait Render: Send + Sync {
    fn first_paint(&self, state: &ViewState);
    fn enriched(&self, state: &ViewState);
}

/// For embedders that only consume the shared state.
pub struct NullRender;

impl Render for NullRender {
    fn first_paint(&self, _state: &ViewState) {}
    fn enriched(&self, _state: &ViewState) {}
}

pub struct Loader<T, R> {
    api: StatusApi<T>,
    state: SharedState,
    render: R,
    in_flight: tokio::sync::Mutex<()>,
}

impl<T: Transport, R: Render> Loader<T, R> {
    pub fn new(api: StatusApi<T>, state: SharedState, render: R) -> Self {
        Self {
            api,
            state,
            render,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Runs one refresh cycle unless another is already in flight, in which
    /// case the trigger is dropped. Coalescing concurrent triggers (the
    /// timer and an external reload firing together) keeps a single writer
    /// on the shared state.
    pub async fn try_load(&self) -> Result<bool, LoadError> {
        let guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                info!("refresh already in flight, coalescing trigger");
                return Ok(false);
            }
        };
        let result = self.load_cycle_inner().await;
        drop(guard);
        result.map(|()| true)
    }

    /// One full cycle: critical phase 1, then best-effort phase 2. Serialized
    /// against concurrent cycles.
    pub async fn load_cycle(&self) -> Result<(), LoadError> {
        let _guard = self.in_flight.lock().await;
        self.load_cycle_inner().await
    }

    async fn load_cycle_inner(&self) -> Result<(), LoadError> {
        let started = Instant::now();
        self.phase_one().await?;
        let first_paint_ms = elapsed_ms(started);

        self.phase_two().await;
        info!(
            first_paint_ms,
            total_ms = elapsed_ms(started),
            "load cycle complete"
        );
        Ok(())
    }

    async fn phase_one(&self) -> Result<(), LoadError> {
        let payload = self.api.status_page().await?;
        info!(
            groups = payload.groups.len(),
            ungrouped = payload.ungrouped.len(),
            announcements = payload.announcements.len(),
            "status payload received"
        );

        let raw_overall = payload
            .overall_status
            .as_deref()
            .or(payload.status.as_deref())
            .unwrap_or("");
        let overall = status::normalize(raw_overall);
        let regions = mapper::map_status_payload(Some(&payload));
        let announcements = mapper::map_announcements(Some(&payload));

        let mut uptime_history = HashMap::new();
        for region in &regions {
            let strip = status::daily_statuses(&region.uptime_blocks);
            if !strip.is_empty() {
                uptime_history.insert(region.name.clone(), strip);
            }
        }

        self.state.apply(StatePatch {
            global: Some(GlobalStatus {
                status: overall,
                message: status::overall_message(overall).to_owned(),
                last_updated: Some(SystemTime::now()),
            }),
            regions: Some(regions),
            uptime_history: Some(uptime_history),
            announcements: Some(announcements),
            ..StatePatch::default()
        });

        self.render.first_paint(&self.state.snapshot());
        Ok(())
    }

    async fn phase_two(&self) {
        let detail = self.api.region_detail().await;

        let incidents: Vec<Announcement> =
            detail.incidents.iter().map(mapper::map_announcement).collect();
        let maintenance: Vec<Announcement> =
            detail.maintenance.iter().map(mapper::map_announcement).collect();
        let feed: Vec<Announcement> =
            detail.feed.iter().map(mapper::map_announcement).collect();

        let previous = self.state.snapshot();

        // Regions are re-attached, not rebuilt: phase 1 owns the region list,
        // phase 2 only hangs incidents and maintenance off it by exact name.
        let mut regions = previous.regions;
        for region in &mut regions {
            region.active_incidents = incidents
                .iter()
                .filter(|incident| incident.region.as_deref() == Some(region.name.as_str()))
                .cloned()
                .collect();
            region.scheduled_maintenance = maintenance
                .iter()
                .filter(|window| window.region.as_deref() == Some(region.name.as_str()))
                .cloned()
                .collect();
        }

        let announcements = merge_announcements(&previous.announcements, &feed);

        let mut patch = StatePatch {
            regions: Some(regions),
            announcements: Some(announcements),
            incident_feed: Some(feed),
            ..StatePatch::default()
        };

        match detail.regions {
            Some(catalog) => patch.region_catalog = Some(catalog.regions),
            None => warn!("region catalog unavailable, keeping previous"),
        }

        match detail.uptime {
            Some(uptime) => {
                let history: HashMap<String, Vec<Status>> = uptime
                    .regions
                    .iter()
                    .map(|(name, blocks)| (name.clone(), status::daily_statuses(blocks)))
                    .collect();
                patch.uptime_history = Some(history);
            }
            None => warn!("uptime history unavailable, keeping previous"),
        }

        match detail.latency {
            Some(latency) => {
                patch.latency = Some(latency.matrix);
                patch.latency_hub = Some(latency.hub);
            }
            None => {
                warn!("latency matrix unavailable, clearing");
                patch.latency = Some(HashMap::new());
                patch.latency_hub = Some(String::new());
            }
        }

        self.state.apply(patch);
        self.render.enriched(&self.state.snapshot());
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
