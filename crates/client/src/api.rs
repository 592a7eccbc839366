//! Typed client for the unauthenticated `/api/status/*` endpoints.
//!
//! The primary payload goes through the retrying fetch path; every other
//! endpoint is best-effort and degrades to `None`/empty on any failure.

use crate::fetch::{FetchError, Fetcher, Transport};
use statuswatch_core::payload::{
    IncidentFeed, LatencyResponse, RawAnnouncement, RegionCatalogEntry, RegionsResponse,
    StatusPayload, UptimeResponse,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{url} returned a body that could not be decoded")]
    Decode { url: String },
}

#[derive(Debug, Clone)]
pub struct StatusApi<T> {
    fetcher: Fetcher<T>,
    base: String,
    slug: String,
}

/// Settled results of the phase-2 fan-out. `None` means the endpoint failed
/// and the caller should keep its previous value; the list fields already
/// degrade to empty.
#[derive(Debug, Clone, Default)]
pub struct RegionDetail {
    pub regions: Option<RegionsResponse>,
    pub uptime: Option<UptimeResponse>,
    pub latency: Option<LatencyResponse>,
    pub incidents: Vec<RawAnnouncement>,
    pub maintenance: Vec<RawAnnouncement>,
    pub feed: Vec<RawAnnouncement>,
}

impl<T: Transport> StatusApi<T> {
    pub fn new(fetcher: Fetcher<T>, api_base: impl Into<String>, slug: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            fetcher,
            base: format!("{}/api/status", api_base.trim_end_matches('/')),
            slug: slug.into(),
        }
    }

    fn page_url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base, self.slug, suffix)
    }

    /// GET `/api/status/{slug}` — the primary payload. Retried; an HTTP
    /// error after the final attempt or an undecodable body is an error,
    /// because phase 1 cannot proceed without it.
    pub async fn status_page(&self) -> Result<StatusPayload, ApiError> {
        let url = self.page_url("");
        let response = self.fetcher.fetch(&url).await?;
        if !response.is_ok() {
            return Err(ApiError::Status {
                url,
                status: response.status,
            });
        }
        response.json().ok_or(ApiError::Decode { url })
    }

    /// GET `/api/status/{slug}/regions` — region-level breakdown.
    pub async fn page_regions(&self) -> Option<RegionsResponse> {
        self.fetcher.fetch_json_once(&self.page_url("/regions")).await
    }

    /// GET `/api/status/{slug}/regions/uptime` — per-region uptime blocks.
    pub async fn page_regions_uptime(&self) -> Option<UptimeResponse> {
        self.fetcher
            .fetch_json_once(&self.page_url("/regions/uptime"))
            .await
    }

    /// GET `/api/status/{slug}/regions/latency` — latency matrix and hub.
    pub async fn page_regions_latency(&self) -> Option<LatencyResponse> {
        self.fetcher
            .fetch_json_once(&self.page_url("/regions/latency"))
            .await
    }

    /// GET `/api/status/{slug}/regions/incidents` — open incidents carrying
    /// a `region` field.
    pub async fn page_region_incidents(&self) -> Option<Vec<RawAnnouncement>> {
        self.fetcher
            .fetch_json_once(&self.page_url("/regions/incidents"))
            .await
    }

    /// GET `/api/status/{slug}/regions/maintenance` — scheduled maintenance
    /// carrying a `region` field.
    pub async fn page_region_maintenance(&self) -> Option<Vec<RawAnnouncement>> {
        self.fetcher
            .fetch_json_once(&self.page_url("/regions/maintenance"))
            .await
    }

    /// GET `/api/status/{slug}/incidents.json` — the richer incident feed.
    /// Accepts a bare array or an `incidents`/`announcements` wrapper.
    pub async fn incident_feed(&self) -> Option<Vec<RawAnnouncement>> {
        let feed: IncidentFeed = self
            .fetcher
            .fetch_json_once(&self.page_url("/incidents.json"))
            .await?;
        Some(feed.into_items())
    }

    /// GET `/api/status/regions` — the global region catalog.
    pub async fn global_regions(&self) -> Option<Vec<RegionCatalogEntry>> {
        self.fetcher
            .fetch_json_once(&format!("{}/regions", self.base))
            .await
    }

    /// RSS feed URL for the current page, for UI linking; never fetched.
    pub fn incident_feed_rss_url(&self) -> String {
        self.page_url("/incidents.rss")
    }

    /// Global RSS feed URL.
    pub fn global_incident_feed_rss_url(&self) -> String {
        format!("{}/incidents.rss", self.base)
    }

    /// Phase-2 fan-out: the five auxiliary endpoints plus the incident feed,
    /// joined with per-member fault isolation. A failed or slow member never
    /// cancels its siblings; the join returns once every member has settled.
    pub async fn region_detail(&self) -> RegionDetail {
        let (regions, uptime, latency, incidents, maintenance, feed) = tokio::join!(
            self.page_regions(),
            self.page_regions_uptime(),
            self.page_regions_latency(),
            self.page_region_incidents(),
            self.page_region_maintenance(),
            self.incident_feed(),
        );

        RegionDetail {
            regions,
            uptime,
            latency,
            incidents: incidents.unwrap_or_default(),
            maintenance: maintenance.unwrap_or_default(),
            feed: feed.unwrap_or_default(),
        }
    }
}
