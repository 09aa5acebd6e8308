//! Location record module - one geocoded place extracted from a document

use serde::{Deserialize, Serialize};

/// Lowest accepted confidence/precision score
pub const MIN_SCORE: u8 = 1;

/// Highest accepted confidence/precision score
pub const MAX_SCORE: u8 = 10;

/// Default number of decimals used when comparing coordinates
pub const DEFAULT_COORDINATE_DECIMALS: u32 = 4;

/// A single geocoded place mentioned in an item's text
///
/// Field order is the serialization order in the results file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Place name as it should be displayed
    pub name: String,

    /// Postal address or geocoder display name
    pub address: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// How sure the producer is that this is the intended place (1-10)
    pub confidence: u8,

    /// How specific the coordinates are, from country (1) to building (10)
    pub precision: u8,

    /// Free-form geocoding status reported by the producer
    #[serde(default)]
    pub status: String,

    /// Text fragment the location was extracted from
    #[serde(default)]
    pub original_snippet: String,

    /// Producer's explanation for the chosen candidate
    #[serde(default)]
    pub reasoning: String,
}

impl LocationRecord {
    /// Check the record against the location schema bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use geonext_domain::LocationRecord;
    ///
    /// let mut record = LocationRecord::new("Paris", "Paris, France", 48.8566, 2.3522);
    /// assert!(record.validate().is_ok());
    ///
    /// record.confidence = 11;
    /// assert!(record.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude {} out of range [-90, 90]", self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude {} out of range [-180, 180]",
                self.longitude
            ));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.confidence) {
            return Err(format!(
                "confidence {} out of range [{}, {}]",
                self.confidence, MIN_SCORE, MAX_SCORE
            ));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.precision) {
            return Err(format!(
                "precision {} out of range [{}, {}]",
                self.precision, MIN_SCORE, MAX_SCORE
            ));
        }
        Ok(())
    }

    /// Create a record with mid-range scores and empty annotations
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
            confidence: 5,
            precision: 5,
            status: String::new(),
            original_snippet: String::new(),
            reasoning: String::new(),
        }
    }

    /// Deduplication key for this record's coordinates
    pub fn coordinate_key(&self, decimals: u32) -> CoordinateKey {
        CoordinateKey::new(self.latitude, self.longitude, decimals)
    }
}

/// Coordinates rounded to a fixed number of decimals
///
/// Two places whose keys are equal are treated as the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey {
    lat: i64,
    lon: i64,
}

impl CoordinateKey {
    /// Round `latitude`/`longitude` to `decimals` places
    ///
    /// # Examples
    ///
    /// ```
    /// use geonext_domain::CoordinateKey;
    ///
    /// let a = CoordinateKey::new(55.40381, 10.40239, 4);
    /// let b = CoordinateKey::new(55.40379, 10.40241, 4);
    /// assert_eq!(a, b);
    /// ```
    pub fn new(latitude: f64, longitude: f64, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        Self {
            lat: (latitude * scale).round() as i64,
            lon: (longitude * scale).round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odense() -> LocationRecord {
        LocationRecord {
            name: "Odense".to_string(),
            address: "Odense, Denmark".to_string(),
            latitude: 55.4038,
            longitude: 10.4024,
            confidence: 8,
            precision: 4,
            status: "geocoded".to_string(),
            original_snippet: "met in Odense".to_string(),
            reasoning: "single candidate".to_string(),
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(odense().validate().is_ok());
    }

    #[test]
    fn test_empty_name() {
        let mut record = odense();
        record.name = "  ".to_string();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let mut record = odense();
        record.latitude = 91.0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_longitude_not_finite() {
        let mut record = odense();
        record.longitude = f64::NAN;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_score_bounds() {
        let mut record = odense();
        record.confidence = 0;
        assert!(record.validate().is_err());

        let mut record = odense();
        record.precision = 11;
        assert!(record.validate().is_err());

        let mut record = odense();
        record.confidence = 1;
        record.precision = 10;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_serialization_field_order() {
        let json = serde_json::to_string(&odense()).unwrap();
        let name = json.find("\"name\"").unwrap();
        let address = json.find("\"address\"").unwrap();
        let reasoning = json.find("\"reasoning\"").unwrap();
        assert!(name < address);
        assert!(address < reasoning);
    }

    #[test]
    fn test_optional_annotations_default() {
        let json = r#"{
            "name": "Paris",
            "address": "Paris, France",
            "latitude": 48.8566,
            "longitude": 2.3522,
            "confidence": 9,
            "precision": 5
        }"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, "");
        assert_eq!(record.original_snippet, "");
        assert_eq!(record.reasoning, "");
    }

    #[test]
    fn test_coordinate_key_rounding() {
        let a = CoordinateKey::new(48.85661, 2.35219, 4);
        let b = CoordinateKey::new(48.85659, 2.35221, 4);
        let c = CoordinateKey::new(48.8570, 2.3522, 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_coordinate_key_negative() {
        let a = CoordinateKey::new(-33.86882, 151.20929, 4);
        let b = CoordinateKey::new(-33.86878, 151.20931, 4);
        assert_eq!(a, b);
    }
}
