//! Transforms the heterogeneous primary payload (grouped + ungrouped
//! services) into the uniform region view models, and extracts inline
//! announcements. Fails soft throughout: a missing payload yields empty
//! lists.

use crate::models::{round2, Announcement, AnnouncementKind, Entry, Region, Service};
use crate::payload::{RawAnnouncement, RawEntry, RawService, StatusPayload};
use crate::status;

/// One region per payload group, plus a synthetic "Ungrouped" region when
/// the payload carries ungrouped services.
pub fn map_status_payload(payload: Option<&StatusPayload>) -> Vec<Region> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    let mut regions = Vec::with_capacity(payload.groups.len() + 1);

    for group in &payload.groups {
        let raw_status = group
            .aggregate_status
            .as_deref()
            .or(group.status.as_deref())
            .unwrap_or("");
        regions.push(Region {
            id: group.id.clone(),
            name: group.name.clone().unwrap_or_else(|| "Group".to_owned()),
            code: String::new(),
            flag: String::new(),
            status: status::normalize(raw_status),
            uptime: round2(group.aggregate_uptime.unwrap_or(100.0)),
            uptime_blocks: group.aggregate_uptime_blocks.clone(),
            labels: group.labels.clone(),
            active_incidents: Vec::new(),
            scheduled_maintenance: Vec::new(),
            services: group.services.iter().map(map_service).collect(),
        });
    }

    if !payload.ungrouped.is_empty() {
        let services: Vec<Service> = payload.ungrouped.iter().map(map_service).collect();
        let statuses: Vec<_> = services.iter().map(|service| service.status).collect();
        let member_count = payload.ungrouped.len() as f64;
        let uptime_sum: f64 = payload
            .ungrouped
            .iter()
            .map(|service| service.uptime.unwrap_or(100.0))
            .sum();

        regions.push(Region {
            id: None,
            name: "Ungrouped".to_owned(),
            code: String::new(),
            flag: String::new(),
            status: status::aggregate(&statuses),
            uptime: round2(uptime_sum / member_count),
            uptime_blocks: Vec::new(),
            labels: Vec::new(),
            active_incidents: Vec::new(),
            scheduled_maintenance: Vec::new(),
            services,
        });
    }

    regions
}

fn map_service(raw: &RawService) -> Service {
    let raw_status = raw
        .status
        .as_deref()
        .or(raw.current_status.as_deref())
        .unwrap_or("");
    Service {
        name: raw.display_name.clone().unwrap_or_default(),
        status: status::normalize(raw_status),
        uptime: round2(raw.uptime.unwrap_or(100.0)),
        uptime_blocks: raw.uptime_blocks.clone(),
        labels: raw.labels.clone(),
        protocol: raw.protocol.clone(),
        latency: raw.latency,
    }
}

/// Inline announcements from the primary payload. Status defaults to
/// "investigating"; kind and published stay absent when upstream omitted
/// them so a later merge never mistakes the defaults for explicit values.
pub fn map_announcements(payload: Option<&StatusPayload>) -> Vec<Announcement> {
    let Some(payload) = payload else {
        return Vec::new();
    };
    payload.announcements.iter().map(map_announcement).collect()
}

/// Shared by the inline payload, the incident feed, and the per-region
/// incident/maintenance endpoints.
pub fn map_announcement(raw: &RawAnnouncement) -> Announcement {
    let kind = raw.kind.as_deref().map(|kind| match kind {
        "maintenance" => AnnouncementKind::Maintenance,
        _ => AnnouncementKind::Incident,
    });
    Announcement {
        id: raw.id.clone(),
        title: raw.title.clone().unwrap_or_default(),
        kind,
        status: raw
            .status
            .clone()
            .unwrap_or_else(|| "investigating".to_owned()),
        summary: raw.summary.clone(),
        starts_at: raw.starts_at.clone(),
        ends_at: raw.ends_at.clone(),
        resolved_at: raw.resolved_at.clone(),
        published: raw.published,
        region: raw.region.clone(),
        service_ids: raw.service_ids.clone(),
        group_ids: raw.group_ids.clone(),
        label_ids: raw.label_ids.clone(),
        entries: raw.entries.iter().map(map_entry).collect(),
    }
}

fn map_entry(raw: &RawEntry) -> Entry {
    Entry {
        status: raw.status.clone().unwrap_or_default(),
        message: raw.message.clone().unwrap_or_default(),
        created_at: raw.created_at.clone(),
        visibility: raw.visibility.clone(),
    }
}
