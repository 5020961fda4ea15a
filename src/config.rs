use clap::Parser;

/// ADS-B Radar Scope Configuration
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the persisted settings file
    #[arg(long, value_name = "FILE", default_value = "radar-settings.json")]
    pub settings_file: String,

    /// Override the reference point latitude (degrees)
    #[arg(long, value_name = "DEG")]
    pub home_lat: Option<f64>,

    /// Override the reference point longitude (degrees)
    #[arg(long, value_name = "DEG")]
    pub home_lon: Option<f64>,

    /// Override the radar radius (nautical miles, 10-200)
    #[arg(long, value_name = "NM")]
    pub radius_nm: Option<u32>,

    /// Disable per-aircraft labels
    #[arg(long, default_value_t = false)]
    pub no_labels: bool,

    /// Base URL of the aircraft feed
    #[arg(long, default_value = "https://api.adsb.lol/v2/point")]
    pub api_url: String,

    /// Seconds between feed polls
    #[arg(long, default_value_t = 10)]
    pub poll_interval: u64,

    /// Verbose logging (DEBUG level)
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}
