// ADS-B Radar Scope - Main Entry Point
//
// Wires the feed client, the aircraft store, and the scope matcher
// together: one periodic ingestion task and one render-cycle task share
// the store; the matcher and sink live on the render side only.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use adsb_radar::config::Config;
use adsb_radar::constants::RENDER_INTERVAL_MS;
use adsb_radar::ingest::{self, AdsbClient};
use adsb_radar::output::{ScopeSink, TraceSink};
use adsb_radar::scope::{ScopeMatcher, VisibilityPolicy};
use adsb_radar::settings::RadarSettings;
use adsb_radar::store::AircraftStore;
use clap::Parser;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    init_logging(config.verbose);

    info!("Starting ADS-B radar scope");

    // Load persisted settings, apply CLI overrides, validate before
    // anything reaches the store
    let mut settings = RadarSettings::load(Path::new(&config.settings_file))?;
    if let Some(lat) = config.home_lat {
        settings.home_lat = lat;
    }
    if let Some(lon) = config.home_lon {
        settings.home_lon = lon;
    }
    if let Some(radius) = config.radius_nm {
        settings.radius_nm = radius;
    }
    if config.no_labels {
        settings.show_labels = false;
    }
    if let Err(e) = settings.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }
    settings.save(Path::new(&config.settings_file))?;

    info!("Configuration ready:");
    info!("  Home: {:.4}, {:.4}", settings.home_lat, settings.home_lon);
    info!("  Radius: {} NM", settings.radius_nm);
    info!("  Show labels: {}", settings.show_labels);
    info!("  Label: {}", settings.display_label);
    info!("  Feed: {} (every {} s)", config.api_url, config.poll_interval);

    let store = Arc::new(AircraftStore::new(
        settings.home_lat,
        settings.home_lon,
        settings.radius_nm,
    ));
    let client = Arc::new(AdsbClient::new(&config.api_url)?);
    let settings = Arc::new(RwLock::new(settings));

    // Ingestion task: poll, upsert, prune
    let poll_interval_ms = config.poll_interval * 1000;
    tokio::spawn(ingest::run_poll_loop(
        client.clone(),
        store.clone(),
        settings.clone(),
        poll_interval_ms,
    ));

    // Render-cycle task: snapshot, reconcile, present
    {
        let store = store.clone();
        let settings = settings.clone();
        tokio::spawn(async move {
            let mut matcher = ScopeMatcher::new();
            let mut sink = TraceSink::new();
            let mut interval = tokio::time::interval(Duration::from_millis(RENDER_INTERVAL_MS));
            loop {
                interval.tick().await;
                let policy = {
                    let s = settings.read().await;
                    VisibilityPolicy {
                        show_labels: s.show_labels,
                        max_label_count: s.max_label_count,
                        radius_nm: s.radius_nm,
                    }
                };
                let snapshot = store.snapshot();
                for decision in matcher.reconcile(&snapshot, &policy) {
                    sink.apply(&decision);
                }
                sink.cycle_complete(matcher.entity_count());
            }
        });
    }

    // Status task: periodic one-line summary
    {
        let store = store.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(15));
            interval.tick().await; // skip the immediate first tick
            loop {
                interval.tick().await;
                let age = client
                    .data_age_secs()
                    .map(|a| format!("{} s", a))
                    .unwrap_or_else(|| "never".to_string());
                info!(
                    "Status: {} aircraft tracked, feed age {}",
                    store.count(),
                    age
                );
            }
        });
    }

    info!("Radar scope running");

    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal (Ctrl+C)"),
        Err(err) => {
            error!("Unable to listen for shutdown signal: {}", err);
            return Err(err.into());
        }
    }

    info!("Stopped. Final aircraft count: {}", store.count());
    Ok(())
}

/// Initialize logging subsystem
fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    if verbose {
        subscriber.with_max_level(tracing::Level::DEBUG).init();
        info!("Verbose logging enabled (DEBUG level)");
    } else {
        subscriber.with_max_level(tracing::Level::INFO).init();
    }
}
