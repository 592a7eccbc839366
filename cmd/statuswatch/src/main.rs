mod cli;
mod render;

use clap::Parser;
use cli::Options;
use render::ConsoleRender;
use statuswatch_client::api::StatusApi;
use statuswatch_client::fetch::{Fetcher, HttpTransport};
use statuswatch_client::load::{LoadError, Loader};
use statuswatch_core::state::SharedState;
use tokio::time;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let options = Options::parse();
    if let Err(err) = run(options).await {
        error!(error = %err, "statuswatch failed, status page unreachable");
        std::process::exit(1);
    }
}

async fn run(options: Options) -> Result<(), LoadError> {
    info!(
        api_base = %options.api_base,
        slug = %options.slug,
        refresh_seconds = options.refresh_seconds,
        "statuswatch started"
    );

    let fetcher = Fetcher::new(HttpTransport::new()?);
    let api = StatusApi::new(fetcher, &options.api_base, &options.slug);
    let loader = Loader::new(api, SharedState::new(), ConsoleRender);

    if options.once {
        return loader.load_cycle().await;
    }

    // The first cycle is not fatal in watch mode; the ticker re-runs both
    // phases from scratch on the next interval.
    if let Err(err) = loader.load_cycle().await {
        warn!(error = %err, "initial load failed");
    }

    let mut ticker = time::interval(options.refresh_interval());
    // the interval fires immediately once; the initial load already covered it
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                info!("auto-refreshing status data");
            }
            _ = reload_requested() => {
                info!("reload requested, refreshing immediately");
            }
        }
        if let Err(err) = loader.try_load().await {
            warn!(error = %err, "refresh cycle failed");
        }
    }
}

/// Resolves when an immediate reload is requested from outside the timer.
/// SIGHUP stands in for a "back online" network event: operators can force
/// a full reload without waiting out the interval.
#[cfg(unix)]
async fn reload_requested() {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::hangup()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            warn!(error = %err, "SIGHUP handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn reload_requested() {
    std::future::pending::<()>().await;
}
