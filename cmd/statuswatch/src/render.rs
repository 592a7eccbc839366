//! Console render collaborator.
//!
//! Stand-in for the DOM renderer at the same interface boundary: it reads
//! snapshots, never mutates them, and only ever sees public timeline
//! entries.

use statuswatch_client::load::Render;
use statuswatch_core::link;
use statuswatch_core::state::ViewState;
use statuswatch_core::status;

pub struct ConsoleRender;

impl ConsoleRender {
    fn print_snapshot(&self, state: &ViewState, phase: &str) {
        println!();
        println!("== {} [{phase}, snapshot v{}]", state.global.message, state.version);

        for region in &state.regions {
            println!(
                "  {:<24} {:<12} {:>7.2}% uptime  {} services",
                region.name,
                status::label(region.status),
                region.uptime,
                region.services.len()
            );
            for incident in &region.active_incidents {
                println!("      incident: {}", incident.title);
            }
            for window in &region.scheduled_maintenance {
                println!("      maintenance: {}", window.title);
            }
            let (related_incidents, related_maintenance) =
                link::announcements_for_region(region, &state.announcements);
            for incident in related_incidents {
                println!("      related incident: {}", incident.title);
            }
            for window in related_maintenance {
                println!("      related maintenance: {}", window.title);
            }
        }

        for announcement in &state.announcements {
            if !announcement.is_published() {
                continue;
            }
            let updates = announcement.public_entries().count();
            println!(
                "  [{}] {} ({}, {} updates)",
                announcement.kind(),
                announcement.title,
                announcement.status,
                updates
            );
        }

        if let Some(row) = state.latency.get(&state.latency_hub) {
            let mut pairs: Vec<(&String, &f64)> = row.iter().collect();
            pairs.sort_by(|left, right| left.0.cmp(right.0));
            for (destination, millis) in pairs {
                println!("  latency {} -> {destination}: {millis:.0}ms", state.latency_hub);
            }
        }
    }
}

impl Render for ConsoleRender {
    fn first_paint(&self, state: &ViewState) {
        self.print_snapshot(state, "first paint");
    }

    fn enriched(&self, state: &ViewState) {
        self.print_snapshot(state, "enriched");
    }
}
