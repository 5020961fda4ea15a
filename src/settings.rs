// Persisted radar settings - JSON file storage and validation
//
// The scope's runtime configuration (reference point, radius, label
// policy) survives restarts through a small JSON settings file. All
// validation happens here; the store assumes every value it receives is
// already in range.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{MAX_RADAR_RADIUS_NM, MIN_RADAR_RADIUS_NM};
use crate::errors::{RadarError, Result};

/// Runtime configuration of the radar scope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadarSettings {
    /// Reference point latitude (degrees)
    pub home_lat: f64,
    /// Reference point longitude (degrees)
    pub home_lon: f64,
    /// Radar radius in nautical miles
    pub radius_nm: u32,
    /// Whether per-aircraft labels are drawn at all
    pub show_labels: bool,
    /// Label density culling threshold
    pub max_label_count: usize,
    /// Title shown at the top of the scope
    pub display_label: String,
}

impl Default for RadarSettings {
    fn default() -> Self {
        RadarSettings {
            home_lat: 0.0,
            home_lon: 0.0,
            radius_nm: 50,
            show_labels: true,
            max_label_count: 32,
            display_label: "RADAR - 50NM".to_string(),
        }
    }
}

impl RadarSettings {
    /// Load settings from a JSON file. A missing file is first boot:
    /// defaults are returned and the caller is expected to persist them.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No settings file at {} - using defaults", path.display());
            return Ok(RadarSettings::default());
        }
        let body = std::fs::read_to_string(path)?;
        let settings: RadarSettings = serde_json::from_str(&body)?;
        info!("Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Persist settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_string_pretty(self)?;
        std::fs::write(path, body)?;
        info!("Settings written to {}", path.display());
        Ok(())
    }

    /// Reject out-of-range values before they can reach the store
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.home_lat) {
            return Err(RadarError::Config(format!(
                "latitude {} outside [-90, 90]",
                self.home_lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.home_lon) {
            return Err(RadarError::Config(format!(
                "longitude {} outside [-180, 180]",
                self.home_lon
            )));
        }
        if self.radius_nm < MIN_RADAR_RADIUS_NM || self.radius_nm > MAX_RADAR_RADIUS_NM {
            return Err(RadarError::Config(format!(
                "radius {} NM outside [{}, {}]",
                self.radius_nm, MIN_RADAR_RADIUS_NM, MAX_RADAR_RADIUS_NM
            )));
        }
        if self.max_label_count == 0 {
            warn!("max_label_count is 0; all labels will be suppressed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RadarSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_latitude() {
        let mut s = RadarSettings::default();
        s.home_lat = 91.0;
        assert!(s.validate().is_err());
        s.home_lat = -91.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_longitude() {
        let mut s = RadarSettings::default();
        s.home_lon = 180.5;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_radius() {
        let mut s = RadarSettings::default();
        s.radius_nm = 5;
        assert!(s.validate().is_err());
        s.radius_nm = 250;
        assert!(s.validate().is_err());
        s.radius_nm = 200;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("adsb-radar-no-such-settings.json");
        let _ = std::fs::remove_file(&path);
        let settings = RadarSettings::load(&path).unwrap();
        assert_eq!(settings, RadarSettings::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "adsb-radar-settings-test-{}.json",
            std::process::id()
        ));
        let mut settings = RadarSettings::default();
        settings.home_lat = -33.8688;
        settings.home_lon = 151.2093;
        settings.radius_nm = 75;

        settings.save(&path).unwrap();
        let loaded = RadarSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, settings);
    }
}
