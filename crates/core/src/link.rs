//! Region-to-announcement linking.
//!
//! The contract: an announcement carrying explicit linkage metadata
//! (`group_ids` or `label_ids`) is matched only through that metadata — the
//! group ids against the region id, the label ids against the region labels.
//! Announcements with no linkage metadata fall back to a case-insensitive
//! substring search for the region name in the title and summary. The
//! fallback is best-effort and can false-positive on short region names
//! ("East" matches "east coast maintenance"); callers wanting exact linking
//! should rely on upstream ids.

use crate::models::{Announcement, AnnouncementKind, Region};

fn matches_region(region: &Region, announcement: &Announcement) -> bool {
    let has_metadata =
        !announcement.group_ids.is_empty() || !announcement.label_ids.is_empty();

    if has_metadata {
        if let Some(id) = region.id.as_deref() {
            if announcement.group_ids.iter().any(|group| group == id) {
                return true;
            }
        }
        return announcement
            .label_ids
            .iter()
            .any(|label| region.labels.contains(label));
    }

    let name = region.name.to_lowercase();
    if name.is_empty() {
        return false;
    }
    let title = announcement.title.to_lowercase();
    if title.contains(&name) {
        return true;
    }
    announcement
        .summary
        .as_deref()
        .is_some_and(|summary| summary.to_lowercase().contains(&name))
}

/// Announcements affecting the given region, split into incidents and
/// maintenance windows.
pub fn announcements_for_region<'a>(
    region: &Region,
    announcements: &'a [Announcement],
) -> (Vec<&'a Announcement>, Vec<&'a Announcement>) {
    let mut incidents = Vec::new();
    let mut maintenance = Vec::new();

    for announcement in announcements {
        if !matches_region(region, announcement) {
            continue;
        }
        match announcement.kind() {
            AnnouncementKind::Incident => incidents.push(announcement),
            AnnouncementKind::Maintenance => maintenance.push(announcement),
        }
    }

    (incidents, maintenance)
}
