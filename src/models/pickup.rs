//! Pickup stops and pickup-hour windows.

use std::fmt;

use jiff::civil;
use jiff::fmt::temporal::Pieces;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{GeoPoint, Located};

/// Metadata key holding a pickup's scheduled date-time.
pub const SCHEDULED_TIME_KEY: &str = "scheduledTime";

/// Opaque pickup identifier, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickupId {
    /// Numeric identifier.
    Number(i64),
    /// Textual identifier (UUID, slug, ...).
    Text(String),
}

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickupId::Number(n) => write!(f, "{n}"),
            PickupId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PickupId {
    fn from(n: i64) -> Self {
        PickupId::Number(n)
    }
}

impl From<&str> for PickupId {
    fn from(s: &str) -> Self {
        PickupId::Text(s.to_owned())
    }
}

impl From<String> for PickupId {
    fn from(s: String) -> Self {
        PickupId::Text(s)
    }
}

/// A donated-item collection stop.
///
/// Everything except the id, position and scheduled hour is kept in
/// `metadata` untouched and serialized back inline. Longitude is accepted as
/// `lon` or `lng` and always serialized as `lon`.
///
/// The scheduled hour comes from an explicit `scheduledHour` when present,
/// otherwise from the wall-clock hour of an ISO-8601 `scheduledTime` entry
/// in the metadata (`2024-05-01T10:30:00Z`, `2024-05-01T10:30:00+02:00` or
/// a bare `10:30`). The offset is not applied: the hour is read as written.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::{GeoPoint, Pickup};
///
/// let p = Pickup::new("p-1", GeoPoint::new(48.85, 2.35).unwrap())
///     .with_scheduled_hour(10)
///     .with_metadata("donor", "Ana");
/// assert_eq!(p.id().to_string(), "p-1");
/// assert_eq!(p.scheduled_hour(), Some(10));
/// assert_eq!(p.metadata()["donor"], "Ana");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    id: PickupId,
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scheduled_hour: Option<u8>,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl Pickup {
    /// Creates a pickup at the given location.
    pub fn new(id: impl Into<PickupId>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            lat: location.lat(),
            lon: location.lon(),
            scheduled_hour: None,
            metadata: Map::new(),
        }
    }

    /// Sets the hour of day (0-23) the pickup is scheduled for.
    pub fn with_scheduled_hour(mut self, hour: u8) -> Self {
        self.scheduled_hour = Some(hour);
        self
    }

    /// Attaches an opaque metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Caller-supplied identifier.
    pub fn id(&self) -> &PickupId {
        &self.id
    }

    /// Stores an ISO-8601 scheduled date-time in the metadata.
    pub fn with_scheduled_time(self, time: impl Into<String>) -> Self {
        self.with_metadata(SCHEDULED_TIME_KEY, time.into())
    }

    /// Scheduled hour of day, if known.
    ///
    /// `scheduledHour` wins over `scheduledTime`. A `scheduledTime` that does
    /// not parse or carries no time of day leaves the pickup unscheduled.
    pub fn scheduled_hour(&self) -> Option<u8> {
        self.scheduled_hour.or_else(|| {
            self.metadata
                .get(SCHEDULED_TIME_KEY)
                .and_then(Value::as_str)
                .and_then(hour_of_day)
        })
    }

    /// Opaque metadata.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns `true` if the pickup's coordinates are finite and in range.
    pub fn has_valid_location(&self) -> bool {
        GeoPoint::new(self.lat, self.lon).is_some()
    }
}

/// Extracts the hour from an ISO-8601 date-time or time of day.
fn hour_of_day(text: &str) -> Option<u8> {
    let time = match Pieces::parse(text) {
        Ok(pieces) => pieces.time()?,
        Err(_) => text.parse::<civil::Time>().ok()?,
    };
    u8::try_from(time.hour()).ok()
}

impl Located for Pickup {
    fn location(&self) -> GeoPoint {
        // Range is only checked by `has_valid_location`.
        GeoPoint::from_raw(self.lat, self.lon)
    }
}

/// An inclusive range of hours of the day.
///
/// A window whose start is after its end wraps past midnight, so `22..=2`
/// accepts 22, 23, 0, 1 and 2.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::HourWindow;
///
/// let day = HourWindow::new(9, 17).unwrap();
/// assert!(day.contains(9) && day.contains(17));
/// assert!(!day.contains(18));
///
/// let night = HourWindow::new(22, 2).unwrap();
/// assert!(night.contains(23) && night.contains(1));
/// assert!(!night.contains(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourWindow {
    start_hour: u8,
    end_hour: u8,
}

impl HourWindow {
    /// Creates a window. Returns `None` if either hour is above 23.
    pub fn new(start_hour: u8, end_hour: u8) -> Option<Self> {
        let window = Self {
            start_hour,
            end_hour,
        };
        window.is_valid().then_some(window)
    }

    /// First hour of the window.
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// Last hour of the window (inclusive).
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Returns `true` if both bounds are valid hours of the day.
    pub fn is_valid(&self) -> bool {
        self.start_hour <= 23 && self.end_hour <= 23
    }

    /// Returns `true` if `hour` falls inside the window.
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour <= self.end_hour
        } else {
            hour >= self.start_hour || hour <= self.end_hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_metadata_roundtrips_inline() {
        let json = r#"{"id": 7, "lat": 1.0, "lon": 2.0, "donorName": "Bo", "item": "sofa"}"#;
        let p: Pickup = serde_json::from_str(json).expect("parse");
        assert_eq!(p.id(), &PickupId::Number(7));
        assert_eq!(p.metadata().len(), 2);
        assert_eq!(p.metadata()["item"], "sofa");

        let out = serde_json::to_value(&p).expect("serialize");
        assert_eq!(out["donorName"], "Bo");
        assert_eq!(out["lat"], 1.0);
        assert!(out.get("scheduledHour").is_none());
    }

    #[test]
    fn test_pickup_string_id_and_hour() {
        let json = r#"{"id": "abc", "lat": 1.0, "lng": 2.0, "scheduledHour": 14}"#;
        let p: Pickup = serde_json::from_str(json).expect("parse");
        assert_eq!(p.id().to_string(), "abc");
        assert_eq!(p.scheduled_hour(), Some(14));
        assert_eq!(p.location().lon(), 2.0);
    }

    #[test]
    fn test_lng_alias_serializes_as_lon() {
        let json = r#"{"id": 3, "lat": 1.0, "lng": 2.5}"#;
        let p: Pickup = serde_json::from_str(json).expect("parse");
        let out = serde_json::to_value(&p).expect("serialize");
        assert_eq!(out["lon"], 2.5);
        assert!(out.get("lng").is_none());
        assert!(p.metadata().is_empty());
    }

    #[test]
    fn test_scheduled_time_hour() {
        let json = r#"{"id": 1, "lat": 1.0, "lon": 2.0, "scheduledTime": "2024-05-01T10:30:00Z"}"#;
        let p: Pickup = serde_json::from_str(json).expect("parse");
        assert_eq!(p.scheduled_hour(), Some(10));
        // Kept verbatim for the caller.
        let out = serde_json::to_value(&p).expect("serialize");
        assert_eq!(out["scheduledTime"], "2024-05-01T10:30:00Z");
    }

    #[test]
    fn test_scheduled_time_reads_written_hour() {
        let origin = GeoPoint::new(0.0, 0.0).expect("valid");
        let at = |t: &str| Pickup::new(1, origin).with_scheduled_time(t);
        assert_eq!(at("2024-05-01T23:05:00+02:00").scheduled_hour(), Some(23));
        assert_eq!(at("2024-05-01T07:00:00").scheduled_hour(), Some(7));
        assert_eq!(at("14:45").scheduled_hour(), Some(14));
        assert_eq!(at("2024-05-01").scheduled_hour(), None);
        assert_eq!(at("tomorrow morning").scheduled_hour(), None);
    }

    #[test]
    fn test_scheduled_hour_wins_over_time() {
        let json = r#"{"id": 1, "lat": 1.0, "lon": 2.0, "scheduledHour": 16, "scheduledTime": "2024-05-01T10:30:00Z"}"#;
        let p: Pickup = serde_json::from_str(json).expect("parse");
        assert_eq!(p.scheduled_hour(), Some(16));
    }

    #[test]
    fn test_pickup_invalid_location() {
        let json = r#"{"id": 1, "lat": 120.0, "lon": 2.0}"#;
        let p: Pickup = serde_json::from_str(json).expect("parse");
        assert!(!p.has_valid_location());
    }

    #[test]
    fn test_hour_window_invalid() {
        assert!(HourWindow::new(24, 3).is_none());
        assert!(HourWindow::new(3, 30).is_none());
    }

    #[test]
    fn test_hour_window_single_hour() {
        let w = HourWindow::new(8, 8).expect("valid");
        assert!(w.contains(8));
        assert!(!w.contains(7));
        assert!(!w.contains(9));
    }
}
