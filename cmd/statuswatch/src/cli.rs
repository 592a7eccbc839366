use clap::Parser;
use std::time::Duration;

/// Headless status-page aggregator: polls the public status API and prints
/// a console summary of region health, announcements, and latency.
#[derive(Debug, Parser)]
#[command(name = "statuswatch", version, about)]
pub struct Options {
    /// Base URL of the status API.
    #[arg(
        long,
        env = "STATUSWATCH_API_BASE",
        default_value = "https://monitoring.cloudzy.com"
    )]
    pub api_base: String,

    /// Status page slug under /api/status/.
    #[arg(long, env = "STATUSWATCH_SLUG", default_value = "uptime")]
    pub slug: String,

    /// Seconds between refresh cycles.
    #[arg(long, env = "STATUSWATCH_REFRESH_SECONDS", default_value_t = 300)]
    pub refresh_seconds: u64,

    /// Run a single load cycle and exit.
    #[arg(long)]
    pub once: bool,
}

impl Options {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_seconds.max(1))
    }
}
