use crate::status::Status;
use serde::Serialize;
use std::fmt;
use std::time::SystemTime;

/// Two-decimal rounding used for every uptime percentage. Rounding, never
/// truncation: 97.345 becomes 97.35.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A geographic or logical grouping of monitored services.
///
/// Rebuilt wholesale on every successful phase-1 load; phase 2 only attaches
/// the incident and maintenance lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Region {
    pub id: Option<String>,
    pub name: String,
    pub code: String,
    pub flag: String,
    pub status: Status,
    pub uptime: f64,
    pub uptime_blocks: Vec<Option<f64>>,
    pub labels: Vec<String>,
    pub active_incidents: Vec<Announcement>,
    pub scheduled_maintenance: Vec<Announcement>,
    pub services: Vec<Service>,
}

/// A single monitored service, owned by its parent region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub status: Status,
    pub uptime: f64,
    pub uptime_blocks: Vec<Option<f64>>,
    pub labels: Vec<String>,
    pub protocol: Option<String>,
    pub latency: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    #[default]
    Incident,
    Maintenance,
}

impl fmt::Display for AnnouncementKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnouncementKind::Incident => formatter.write_str("incident"),
            AnnouncementKind::Maintenance => formatter.write_str("maintenance"),
        }
    }
}

/// An incident or maintenance record, possibly carrying a timeline of
/// entries.
///
/// Identity key is `id` when present; id-less announcements can never be
/// merged or de-duplicated across sources. Timestamps are upstream RFC 3339
/// strings passed through untouched — formatting is the renderer's concern.
///
/// `kind` and `published` stay `None` when upstream omitted the field, so
/// merging can tell an explicit value from a default; the `kind()` and
/// `is_published()` accessors apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Announcement {
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<AnnouncementKind>,
    pub status: String,
    pub summary: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub resolved_at: Option<String>,
    pub published: Option<bool>,
    pub region: Option<String>,
    pub service_ids: Vec<String>,
    pub group_ids: Vec<String>,
    pub label_ids: Vec<String>,
    pub entries: Vec<Entry>,
}

impl Announcement {
    /// Effective kind; announcements are incidents unless marked otherwise.
    pub fn kind(&self) -> AnnouncementKind {
        self.kind.unwrap_or_default()
    }

    /// Effective visibility; announcements are published unless explicitly
    /// marked otherwise.
    pub fn is_published(&self) -> bool {
        self.published.unwrap_or(true)
    }

    /// Timeline entries safe to render. Entries marked internal must never
    /// reach a renderer.
    pub fn public_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|entry| !entry.is_internal())
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status.as_str(), "resolved" | "completed")
    }
}

/// A timeline update within an announcement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entry {
    pub status: String,
    pub message: String,
    pub created_at: Option<String>,
    pub visibility: Option<String>,
}

impl Entry {
    pub fn is_internal(&self) -> bool {
        self.visibility.as_deref() == Some("internal")
    }
}

/// Page-wide status banner data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalStatus {
    pub status: Status,
    pub message: String,
    pub last_updated: Option<SystemTime>,
}
