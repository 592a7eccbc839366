use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical health states every upstream status vocabulary collapses into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Operational,
    Degraded,
    Outage,
    Maintenance,
    #[default]
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Status::Operational => "operational",
            Status::Degraded => "degraded",
            Status::Outage => "outage",
            Status::Maintenance => "maintenance",
            Status::Unknown => "unknown",
        };
        formatter.write_str(token)
    }
}

/// Maps a raw upstream status string onto the canonical set.
///
/// Total over all inputs: case-insensitive table lookup, anything
/// unrecognized (including the empty string) is `Unknown`.
pub fn normalize(raw: &str) -> Status {
    match raw.to_ascii_lowercase().as_str() {
        "operational" | "up" => Status::Operational,
        "degraded" | "degraded_service" => Status::Degraded,
        "partial_outage" | "major_outage" | "outage" | "down" => Status::Outage,
        "maintenance" => Status::Maintenance,
        _ => Status::Unknown,
    }
}

/// Worst-of aggregation over member statuses, used for synthetic groups.
///
/// Only ever yields `Operational`, `Degraded`, or `Outage` — maintenance and
/// unknown members do not escalate a group.
pub fn aggregate(statuses: &[Status]) -> Status {
    if statuses.contains(&Status::Outage) {
        return Status::Outage;
    }
    if statuses.contains(&Status::Degraded) {
        return Status::Degraded;
    }
    Status::Operational
}

/// Classifies historical uptime blocks into a per-day status strip.
///
/// Missing blocks are `Unknown`; below 90% counts as an outage day, below
/// 99% as degraded.
pub fn daily_statuses(blocks: &[Option<f64>]) -> Vec<Status> {
    blocks
        .iter()
        .map(|block| match block {
            None => Status::Unknown,
            Some(percent) if *percent < 90.0 => Status::Outage,
            Some(percent) if *percent < 99.0 => Status::Degraded,
            Some(_) => Status::Operational,
        })
        .collect()
}

/// Human-readable one-liner for the page-wide status banner.
pub fn overall_message(status: Status) -> &'static str {
    match status {
        Status::Outage => "Major outage detected",
        Status::Degraded => "Some systems are experiencing issues",
        Status::Maintenance => "Maintenance in progress",
        _ => "All Systems Operational",
    }
}

/// Badge label for a single region or service.
pub fn label(status: Status) -> &'static str {
    match status {
        Status::Operational => "Operational",
        Status::Degraded => "Degraded",
        Status::Outage => "Major Outage",
        Status::Maintenance => "Maintenance",
        Status::Unknown => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_vocabulary() {
        assert_eq!(normalize("operational"), Status::Operational);
        assert_eq!(normalize("up"), Status::Operational);
        assert_eq!(normalize("degraded"), Status::Degraded);
        assert_eq!(normalize("degraded_service"), Status::Degraded);
        assert_eq!(normalize("partial_outage"), Status::Outage);
        assert_eq!(normalize("major_outage"), Status::Outage);
        assert_eq!(normalize("outage"), Status::Outage);
        assert_eq!(normalize("down"), Status::Outage);
        assert_eq!(normalize("maintenance"), Status::Maintenance);
    }

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize("OPERATIONAL"), Status::Operational);
        assert_eq!(normalize("Major_Outage"), Status::Outage);
    }

    #[test]
    fn unrecognized_strings_map_to_unknown() {
        assert_eq!(normalize(""), Status::Unknown);
        assert_eq!(normalize("on_fire"), Status::Unknown);
        assert_eq!(normalize("operational "), Status::Unknown);
    }

    #[test]
    fn aggregate_prefers_outage_over_degraded() {
        let statuses = [Status::Outage, Status::Operational];
        assert_eq!(aggregate(&statuses), Status::Outage);

        let statuses = [Status::Degraded, Status::Operational];
        assert_eq!(aggregate(&statuses), Status::Degraded);
    }

    #[test]
    fn aggregate_of_empty_slice_is_operational() {
        assert_eq!(aggregate(&[]), Status::Operational);
    }

    #[test]
    fn aggregate_never_yields_maintenance_or_unknown() {
        let statuses = [Status::Maintenance, Status::Unknown];
        assert_eq!(aggregate(&statuses), Status::Operational);
    }

    #[test]
    fn classifies_daily_uptime_blocks() {
        let blocks = [None, Some(85.0), Some(95.0), Some(100.0)];
        assert_eq!(
            daily_statuses(&blocks),
            vec![
                Status::Unknown,
                Status::Outage,
                Status::Degraded,
                Status::Operational
            ]
        );
    }

    #[test]
    fn boundary_percentages_round_up_a_class() {
        assert_eq!(daily_statuses(&[Some(90.0)]), vec![Status::Degraded]);
        assert_eq!(daily_statuses(&[Some(99.0)]), vec![Status::Operational]);
    }

    #[test]
    fn overall_message_defaults_to_all_operational() {
        assert_eq!(overall_message(Status::Operational), "All Systems Operational");
        assert_eq!(overall_message(Status::Unknown), "All Systems Operational");
        assert_eq!(overall_message(Status::Outage), "Major outage detected");
    }
}
