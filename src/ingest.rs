// Feed client - periodic HTTP polling of the aircraft feed
//
// Polls the point endpoint on a fixed interval, feeding parsed reports
// into the store. Failures back off exponentially up to a ceiling and
// recover to the base interval on the next success. The tracking core
// never sees a failure; a failed poll is simply a cycle with no upsert,
// and pruning covers the resulting staleness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clock::monotonic_ms;
use crate::constants::{ADSB_FETCH_TIMEOUT_MS, ADSB_MAX_BACKOFF_MS};
use crate::errors::Result;
use crate::report::{parse_reports, RawReport};
use crate::settings::RadarSettings;
use crate::store::AircraftStore;

/// HTTP client for the aircraft feed
pub struct AdsbClient {
    http: reqwest::Client,
    base_url: String,
    /// Monotonic ms of the last successful fetch; 0 = never
    last_update_ms: AtomicU64,
}

impl AdsbClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(ADSB_FETCH_TIMEOUT_MS))
            .build()?;
        Ok(AdsbClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            last_update_ms: AtomicU64::new(0),
        })
    }

    /// Endpoint for aircraft around a point within a radius
    fn poll_url(&self, lat: f64, lon: f64, radius_nm: u32) -> String {
        format!("{}/{:.7}/{:.7}/{}", self.base_url, lat, lon, radius_nm)
    }

    /// Fetch and decode one batch of reports
    pub async fn fetch(&self, lat: f64, lon: f64, radius_nm: u32) -> Result<Vec<RawReport>> {
        let url = self.poll_url(lat, lon, radius_nm);
        debug!("Fetching: {}", url);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let reports = parse_reports(&body)?;
        self.last_update_ms.store(monotonic_ms(), Ordering::Relaxed);
        Ok(reports)
    }

    /// Seconds since the last successful fetch, None if never
    pub fn data_age_secs(&self) -> Option<u64> {
        match self.last_update_ms.load(Ordering::Relaxed) {
            0 => None,
            last => Some((monotonic_ms().saturating_sub(last)) / 1000),
        }
    }
}

/// Periodic poll loop: fetch, upsert, prune. Runs until the task is
/// dropped at shutdown.
pub async fn run_poll_loop(
    client: Arc<AdsbClient>,
    store: Arc<AircraftStore>,
    settings: Arc<RwLock<RadarSettings>>,
    base_interval_ms: u64,
) {
    let mut interval_ms = base_interval_ms;

    loop {
        let (lat, lon, radius_nm) = {
            let s = settings.read().await;
            (s.home_lat, s.home_lon, s.radius_nm)
        };

        match client.fetch(lat, lon, radius_nm).await {
            Ok(reports) => {
                let now = monotonic_ms();
                let stats = store.upsert(&reports, now);
                let pruned = store.prune(now);
                interval_ms = base_interval_ms;
                info!(
                    "Poll ok: {} reports, {} dropped, {} pruned, next poll in {} s",
                    reports.len(),
                    stats.dropped,
                    pruned,
                    interval_ms / 1000
                );
            }
            Err(e) => {
                interval_ms = (interval_ms * 2).min(ADSB_MAX_BACKOFF_MS);
                warn!(
                    "Poll failed ({}), backing off to {} s",
                    e,
                    interval_ms / 1000
                );
            }
        }

        tokio::time::sleep(Duration::from_millis(interval_ms)).await;
    }
}
