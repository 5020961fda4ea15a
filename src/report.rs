// Raw position reports and JSON decoding of the aircraft feed
//
// The feed is the adsb.lol "point" endpoint: a JSON object with an "ac"
// array of aircraft records. Only the fields the scope consumes are
// decoded; records without a hex id are discarded here, before they can
// reach the store.

use serde::{Deserialize, Deserializer};

/// One raw aircraft position report as delivered by the feed
#[derive(Debug, Clone, PartialEq)]
pub struct RawReport {
    /// Hex transponder code, unique key
    pub hex: String,
    /// Callsign, whitespace-trimmed; None if the feed carried none
    pub callsign: Option<String>,
    /// Latitude in degrees, if the record carried a numeric position
    pub lat: Option<f64>,
    /// Longitude in degrees, if the record carried a numeric position
    pub lon: Option<f64>,
    /// Barometric altitude in feet; None when absent or "ground"
    pub altitude: Option<i32>,
    /// Ground speed in knots
    pub speed: Option<f64>,
    /// Track angle in degrees, 0 = true north, clockwise
    pub track: Option<f64>,
}

impl RawReport {
    /// A report is only trackable when both coordinates are present
    pub fn has_position(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// Top-level feed response
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    ac: Vec<FeedAircraft>,
}

/// One aircraft record as it appears on the wire
#[derive(Debug, Deserialize)]
struct FeedAircraft {
    hex: Option<String>,
    flight: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default, deserialize_with = "altitude_or_none")]
    alt_baro: Option<i32>,
    gs: Option<f64>,
    track: Option<f64>,
}

/// The feed encodes aircraft on the ground as `"alt_baro": "ground"`;
/// anything non-numeric decodes as no altitude.
fn altitude_or_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().map(|a| a as i32))
}

/// Decode a feed response body into raw reports.
///
/// Records without a hex id are dropped. Callsigns are trimmed of
/// surrounding whitespace; an empty callsign becomes None.
pub fn parse_reports(body: &str) -> Result<Vec<RawReport>, serde_json::Error> {
    let response: FeedResponse = serde_json::from_str(body)?;

    let reports = response
        .ac
        .into_iter()
        .filter_map(|ac| {
            let hex = ac.hex?;
            if hex.is_empty() {
                return None;
            }
            let callsign = ac
                .flight
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty());
            Some(RawReport {
                hex,
                callsign,
                lat: ac.lat,
                lon: ac.lon,
                altitude: ac.alt_baro,
                speed: ac.gs,
                track: ac.track,
            })
        })
        .collect();

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_record() {
        let body = r#"{"ac":[{"hex":"7c6b2d","flight":"QFA123  ","lat":-33.9,"lon":151.2,"alt_baro":35000,"gs":450.5,"track":270.0}]}"#;
        let reports = parse_reports(body).unwrap();
        assert_eq!(reports.len(), 1);

        let r = &reports[0];
        assert_eq!(r.hex, "7c6b2d");
        assert_eq!(r.callsign.as_deref(), Some("QFA123"));
        assert!(r.has_position());
        assert_eq!(r.altitude, Some(35000));
        assert_eq!(r.speed, Some(450.5));
        assert_eq!(r.track, Some(270.0));
    }

    #[test]
    fn test_parse_skips_records_without_hex() {
        let body = r#"{"ac":[{"lat":1.0,"lon":2.0},{"hex":"abc123","lat":1.0,"lon":2.0}]}"#;
        let reports = parse_reports(body).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].hex, "abc123");
    }

    #[test]
    fn test_parse_missing_position() {
        let body = r#"{"ac":[{"hex":"abc123","alt_baro":10000}]}"#;
        let reports = parse_reports(body).unwrap();
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].has_position());
        assert_eq!(reports[0].altitude, Some(10000));
    }

    #[test]
    fn test_parse_ground_altitude() {
        let body = r#"{"ac":[{"hex":"abc123","lat":1.0,"lon":2.0,"alt_baro":"ground"}]}"#;
        let reports = parse_reports(body).unwrap();
        assert_eq!(reports[0].altitude, None);
    }

    #[test]
    fn test_parse_empty_callsign_is_none() {
        let body = r#"{"ac":[{"hex":"abc123","flight":"   ","lat":1.0,"lon":2.0}]}"#;
        let reports = parse_reports(body).unwrap();
        assert_eq!(reports[0].callsign, None);
    }

    #[test]
    fn test_parse_empty_response() {
        let reports = parse_reports("{}").unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_reports("not json").is_err());
    }
}
