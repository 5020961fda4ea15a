// Aircraft store - bounded table of tracked aircraft with derived scope geometry
//
// Fixed-capacity slot table guarded by a single mutex. Reports are
// upserted by hex id, stale entries are pruned by age, and the renderer
// reads consistent copies via snapshot(). The table never grows past its
// capacity; slots of pruned aircraft are reused by later inserts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::constants::{
    AIRCRAFT_TIMEOUT_MS, CALLSIGN_MAX_LEN, HEX_MAX_LEN, MAX_AIRCRAFT, RADAR_DISPLAY_RADIUS,
    SCREEN_CENTER_X, SCREEN_CENTER_Y,
};
use crate::geodesy;
use crate::report::RawReport;

/// One tracked aircraft with computed scope position
#[derive(Debug, Clone, Default)]
pub struct TrackedAircraft {
    // Raw report data
    /// Hex transponder code (empty when the slot is free)
    pub hex: String,
    /// Callsign, trimmed; empty when the feed carried none
    pub callsign: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Altitude in feet, 0 if absent
    pub altitude: i32,
    /// Ground speed in knots, 0 if absent
    pub speed: f64,
    /// Track angle in degrees, 0 = true north, clockwise, 0 if absent
    pub track: f64,

    // Computed scope position
    /// Distance from the reference point in nautical miles
    pub distance_nm: f64,
    /// True bearing from the reference point, 0-360
    pub bearing_deg: f64,
    /// Screen X coordinate (pixels)
    pub screen_x: i32,
    /// Screen Y coordinate (pixels)
    pub screen_y: i32,

    // Metadata
    /// Monotonic timestamp of the last successful upsert (ms)
    pub last_seen_ms: u64,
    /// Whether this slot holds a live aircraft
    pub active: bool,
}

/// Counters returned by a single upsert batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertStats {
    /// Reports that matched an existing active aircraft
    pub updated: usize,
    /// Reports that claimed a free slot
    pub created: usize,
    /// Reports dropped because the table was full
    pub dropped: usize,
}

/// Table state behind the store mutex
struct StoreInner {
    slots: Vec<TrackedAircraft>,
    ref_lat: f64,
    ref_lon: f64,
    radius_nm: u32,
}

impl StoreInner {
    /// Index of the active slot holding this hex, if any. Exact string
    /// match against the stored (truncated) id.
    fn find(&self, hex: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.active && s.hex == hex)
    }

    /// Lowest-index free slot, if any
    fn find_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.active)
    }

    fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    fn pixels_per_nm(&self) -> f64 {
        RADAR_DISPLAY_RADIUS as f64 / self.radius_nm as f64
    }
}

/// Bounded, mutex-guarded store of tracked aircraft
///
/// All operations are short synchronous critical sections; readers never
/// observe a partially updated aircraft. Data leaves the store by value
/// only (snapshot copies), so callers can hold results across later
/// mutations.
pub struct AircraftStore {
    inner: Mutex<StoreInner>,
    /// Cached active count for the lock-free count() read
    active: AtomicUsize,
    capacity: usize,
}

impl AircraftStore {
    /// Create a store with the default capacity
    pub fn new(ref_lat: f64, ref_lon: f64, radius_nm: u32) -> Self {
        Self::with_capacity(MAX_AIRCRAFT, ref_lat, ref_lon, radius_nm)
    }

    /// Create a store with an explicit capacity (tests use small tables)
    pub fn with_capacity(capacity: usize, ref_lat: f64, ref_lon: f64, radius_nm: u32) -> Self {
        let slots = vec![TrackedAircraft::default(); capacity];
        info!("Aircraft store initialized (max {} aircraft)", capacity);
        AircraftStore {
            inner: Mutex::new(StoreInner {
                slots,
                ref_lat,
                ref_lon,
                radius_nm,
            }),
            active: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Store capacity (maximum simultaneously active aircraft)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of active aircraft; lock-free read of the cached count
    pub fn count(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// Update the reference point. Existing aircraft keep their computed
    /// geometry until their next upsert; callers reading screen positions
    /// right after a change see values relative to the old point.
    pub fn set_reference_point(&self, lat: f64, lon: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.ref_lat = lat;
        inner.ref_lon = lon;
        info!("Reference point set to: {:.6}, {:.6}", lat, lon);
    }

    /// Update the radar radius. Same deferred-recompute policy as
    /// set_reference_point.
    pub fn set_radius(&self, radius_nm: u32) {
        let mut inner = self.inner.lock().unwrap();
        inner.radius_nm = radius_nm;
        info!("Radar radius set to: {} NM", radius_nm);
    }

    /// Ingest a batch of raw reports.
    ///
    /// Reports without a position are skipped entirely. A report matching
    /// an active aircraft overwrites it in place; otherwise the lowest
    /// free slot is claimed. When the table is full the report is dropped
    /// and counted in the returned stats.
    pub fn upsert(&self, reports: &[RawReport], now_ms: u64) -> UpsertStats {
        let mut inner = self.inner.lock().unwrap();
        let mut stats = UpsertStats::default();

        for report in reports {
            if !report.has_position() {
                continue;
            }
            let hex = truncate(&report.hex, HEX_MAX_LEN);

            let idx = match inner.find(&hex) {
                Some(idx) => {
                    stats.updated += 1;
                    idx
                }
                None => match inner.find_free() {
                    Some(idx) => {
                        stats.created += 1;
                        idx
                    }
                    None => {
                        warn!("No free slots for aircraft {}", hex);
                        stats.dropped += 1;
                        continue;
                    }
                },
            };

            let lat = report.lat.unwrap_or(0.0);
            let lon = report.lon.unwrap_or(0.0);
            let distance = geodesy::distance_nm(inner.ref_lat, inner.ref_lon, lat, lon);
            let bearing = geodesy::bearing_deg(inner.ref_lat, inner.ref_lon, lat, lon);
            let (screen_x, screen_y) = geodesy::project(
                distance,
                bearing,
                inner.pixels_per_nm(),
                SCREEN_CENTER_X,
                SCREEN_CENTER_Y,
            );

            let slot = &mut inner.slots[idx];
            slot.hex = hex;
            slot.callsign = report
                .callsign
                .as_deref()
                .map(|c| truncate(c.trim(), CALLSIGN_MAX_LEN))
                .unwrap_or_default();
            slot.lat = lat;
            slot.lon = lon;
            slot.altitude = report.altitude.unwrap_or(0);
            slot.speed = report.speed.unwrap_or(0.0);
            slot.track = report.track.unwrap_or(0.0);
            slot.distance_nm = distance;
            slot.bearing_deg = bearing;
            slot.screen_x = screen_x;
            slot.screen_y = screen_y;
            slot.last_seen_ms = now_ms;
            slot.active = true;
        }

        let active = inner.active_count();
        self.active.store(active, Ordering::Relaxed);
        drop(inner);

        info!(
            "Updated {} aircraft, {} new, {} total active",
            stats.updated, stats.created, active
        );
        stats
    }

    /// Deactivate every aircraft not seen for longer than the staleness
    /// threshold. Returns the number deactivated. Freed slots keep their
    /// stale payload until reuse, but the id is cleared so a later insert
    /// cannot alias it.
    pub fn prune(&self, now_ms: u64) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let mut pruned = 0;

        for slot in inner.slots.iter_mut() {
            if !slot.active {
                continue;
            }
            let age_ms = now_ms.saturating_sub(slot.last_seen_ms);
            if age_ms > AIRCRAFT_TIMEOUT_MS {
                debug!("Pruning stale aircraft {} (age: {} ms)", slot.hex, age_ms);
                slot.active = false;
                slot.hex.clear();
                pruned += 1;
            }
        }

        let active = inner.active_count();
        self.active.store(active, Ordering::Relaxed);
        drop(inner);

        if pruned > 0 {
            info!("Pruned {} stale aircraft, {} remain", pruned, active);
        }
        pruned
    }

    /// Copy out all active aircraft in ascending slot order
    pub fn snapshot(&self) -> Vec<TrackedAircraft> {
        let inner = self.inner.lock().unwrap();
        inner
            .slots
            .iter()
            .filter(|s| s.active)
            .cloned()
            .collect()
    }
}

/// Truncate to at most `max` characters, keeping char boundaries intact
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(hex: &str, lat: f64, lon: f64) -> RawReport {
        RawReport {
            hex: hex.to_string(),
            callsign: None,
            lat: Some(lat),
            lon: Some(lon),
            altitude: Some(30000),
            speed: Some(400.0),
            track: Some(90.0),
        }
    }

    #[test]
    fn test_store_starts_empty() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        assert_eq!(store.count(), 0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_upsert_creates_and_computes_geometry() {
        let store = AircraftStore::new(0.0, 0.0, 100);
        let stats = store.upsert(&[report("abc123", 0.0, 1.0)], 1000);

        assert_eq!(stats.created, 1);
        assert_eq!(store.count(), 1);

        let snap = store.snapshot();
        assert_eq!(snap.len(), 1);
        let ac = &snap[0];
        assert_eq!(ac.hex, "abc123");
        // One degree of longitude at the equator, due east
        assert!((ac.distance_nm - 60.04).abs() < 0.05, "dist {}", ac.distance_nm);
        assert!((ac.bearing_deg - 90.0).abs() < 1e-6, "brg {}", ac.bearing_deg);
        assert!(ac.screen_x > SCREEN_CENTER_X);
        assert_eq!(ac.screen_y, SCREEN_CENTER_Y);
        assert_eq!(ac.last_seen_ms, 1000);
    }

    #[test]
    fn test_upsert_without_position_is_skipped() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        let r = RawReport {
            hex: "abc123".to_string(),
            callsign: None,
            lat: None,
            lon: None,
            altitude: Some(10000),
            speed: None,
            track: None,
        };
        let stats = store.upsert(&[r], 1000);
        assert_eq!(stats, UpsertStats::default());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_upsert_same_id_updates_in_place() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        store.upsert(&[report("abc123", 0.0, 0.5)], 1000);
        let stats = store.upsert(&[report("abc123", 0.1, 0.5)], 2000);

        assert_eq!(stats.updated, 1);
        assert_eq!(stats.created, 0);

        let snap = store.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].lat, 0.1);
        assert_eq!(snap[0].last_seen_ms, 2000);
    }

    #[test]
    fn test_capacity_exceeded_drops_one() {
        let store = AircraftStore::with_capacity(4, 0.0, 0.0, 50);
        let reports: Vec<RawReport> = (0..5)
            .map(|i| report(&format!("hex{:03}", i), 0.1 * i as f64, 0.5))
            .collect();

        let stats = store.upsert(&reports, 1000);
        assert_eq!(stats.created, 4);
        assert_eq!(stats.dropped, 1);
        assert_eq!(store.count(), 4);
    }

    #[test]
    fn test_count_never_exceeds_capacity() {
        let store = AircraftStore::with_capacity(8, 0.0, 0.0, 50);
        for batch in 0..10 {
            let reports: Vec<RawReport> = (0..6)
                .map(|i| report(&format!("b{}a{}", batch, i), 0.1, 0.2))
                .collect();
            store.upsert(&reports, 1000 + batch);
            assert!(store.count() <= store.capacity());
        }
    }

    #[test]
    fn test_prune_removes_stale_aircraft() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        store.upsert(&[report("old001", 0.1, 0.1)], 1000);
        store.upsert(&[report("new001", 0.2, 0.2)], 50_000);

        // old001 is 61s stale, new001 is 12s old
        let pruned = store.prune(62_000);
        assert_eq!(pruned, 1);
        assert_eq!(store.count(), 1);

        let snap = store.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].hex, "new001");
    }

    #[test]
    fn test_prune_exactly_at_threshold_keeps_aircraft() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        store.upsert(&[report("abc123", 0.1, 0.1)], 0);
        // Age must exceed the threshold, not merely reach it
        assert_eq!(store.prune(AIRCRAFT_TIMEOUT_MS), 0);
        assert_eq!(store.prune(AIRCRAFT_TIMEOUT_MS + 1), 1);
    }

    #[test]
    fn test_pruned_slot_is_reused() {
        let store = AircraftStore::with_capacity(2, 0.0, 0.0, 50);
        store.upsert(&[report("aaa111", 0.1, 0.1), report("bbb222", 0.2, 0.2)], 1000);

        // Age out the first slot only
        store.upsert(&[report("bbb222", 0.2, 0.2)], 70_000);
        store.prune(70_000);
        assert_eq!(store.count(), 1);

        // New aircraft claims the freed slot 0
        let stats = store.upsert(&[report("ccc333", 0.3, 0.3)], 71_000);
        assert_eq!(stats.created, 1);
        assert_eq!(store.count(), 2);

        let snap = store.snapshot();
        assert_eq!(snap[0].hex, "ccc333");
        assert_eq!(snap[1].hex, "bbb222");
    }

    #[test]
    fn test_config_change_does_not_recompute() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        store.upsert(&[report("abc123", 0.0, 0.5)], 1000);
        let before = store.snapshot()[0].clone();

        store.set_reference_point(10.0, 10.0);
        store.set_radius(100);

        // Geometry is untouched until the next upsert
        let after = store.snapshot()[0].clone();
        assert_eq!(before.distance_nm, after.distance_nm);
        assert_eq!(before.screen_x, after.screen_x);

        // Next upsert picks up the new reference point
        store.upsert(&[report("abc123", 0.0, 0.5)], 2000);
        let recomputed = store.snapshot()[0].clone();
        assert!(recomputed.distance_nm > after.distance_nm);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        store.upsert(&[report("abc123", 0.1, 0.1)], 1000);
        let snap = store.snapshot();

        store.upsert(&[report("abc123", 5.0, 5.0)], 2000);
        assert_eq!(snap[0].lat, 0.1);
    }

    #[test]
    fn test_overlong_fields_truncated() {
        let store = AircraftStore::new(0.0, 0.0, 50);
        let r = RawReport {
            hex: "abcdef0123".to_string(),
            callsign: Some("VERYLONGCALLSIGN".to_string()),
            lat: Some(0.1),
            lon: Some(0.1),
            altitude: None,
            speed: None,
            track: None,
        };
        store.upsert(&[r], 1000);

        let snap = store.snapshot();
        assert_eq!(snap[0].hex.len(), HEX_MAX_LEN);
        assert_eq!(snap[0].callsign.len(), CALLSIGN_MAX_LEN);
        assert_eq!(snap[0].altitude, 0);
    }
}
