// Shared constants for the radar scope (capacity, timing, screen geometry)

/// Earth radius in nautical miles, used by the haversine distance
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Maximum number of aircraft tracked simultaneously (store capacity)
pub const MAX_AIRCRAFT: usize = 64;

/// Age after which a tracked aircraft is considered stale and pruned (ms)
pub const AIRCRAFT_TIMEOUT_MS: u64 = 60_000;

/// Maximum stored length of the hex transponder id (excess is truncated)
pub const HEX_MAX_LEN: usize = 7;

/// Maximum stored length of the callsign (excess is truncated)
pub const CALLSIGN_MAX_LEN: usize = 11;

// --- Screen geometry ---

/// Square screen edge in pixels
pub const SCREEN_SIZE: i32 = 800;

/// Scope center X coordinate (pixels)
pub const SCREEN_CENTER_X: i32 = SCREEN_SIZE / 2;

/// Scope center Y coordinate (pixels)
pub const SCREEN_CENTER_Y: i32 = SCREEN_SIZE / 2;

/// Radius of the outermost range ring in pixels; the configured radar
/// radius in NM maps onto this many pixels
pub const RADAR_DISPLAY_RADIUS: i32 = 360;

/// Velocity vector length per knot of ground speed (pixels)
pub const VELOCITY_VECTOR_SCALE: f64 = 0.2;

/// Altitude below which a blip is drawn in the low band (ft)
pub const ALTITUDE_BAND_LOW_FT: i32 = 10_000;

/// Altitude below which a blip is drawn in the medium band (ft)
pub const ALTITUDE_BAND_MEDIUM_FT: i32 = 25_000;

// --- Timing ---

/// Base interval between ADS-B API polls (ms)
pub const ADSB_POLL_INTERVAL_MS: u64 = 10_000;

/// HTTP request timeout for a single API poll (ms)
pub const ADSB_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Ceiling for the exponential poll backoff after failures (ms)
pub const ADSB_MAX_BACKOFF_MS: u64 = 60_000;

/// Interval between render cycles (ms)
pub const RENDER_INTERVAL_MS: u64 = 1_000;

// --- Configuration bounds ---

/// Smallest accepted radar radius (NM)
pub const MIN_RADAR_RADIUS_NM: u32 = 10;

/// Largest accepted radar radius (NM)
pub const MAX_RADAR_RADIUS_NM: u32 = 200;
