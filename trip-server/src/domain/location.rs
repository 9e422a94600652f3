//! Geographic location types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when coordinates fall outside the valid WGS84 range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A validated longitude/latitude pair.
///
/// Routing services exchange positions as `[longitude, latitude]`, so that
/// is the order used here as well.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinates;
///
/// let denver = Coordinates::new(-104.99, 39.74).unwrap();
/// assert_eq!(denver.longitude(), -104.99);
///
/// assert!(Coordinates::new(-181.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, 90.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Create coordinates, checking both components are in range.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(InvalidCoordinates {
                reason: "components must be finite numbers",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                reason: "longitude must be between -180 and 180",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                reason: "latitude must be between -90 and 90",
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Parse a `[longitude, latitude]` slice.
    pub fn from_slice(values: &[f64]) -> Result<Self, InvalidCoordinates> {
        match values {
            [lon, lat] => Self::new(*lon, *lat),
            _ => Err(InvalidCoordinates {
                reason: "expected [longitude, latitude]",
            }),
        }
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns `[longitude, latitude]`.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Quantise to integer micro-degrees, for use as a hash key.
    pub fn micro_degrees(&self) -> (i64, i64) {
        (
            (self.longitude * 1e6).round() as i64,
            (self.latitude * 1e6).round() as i64,
        )
    }
}

impl TryFrom<[f64; 2]> for Coordinates {
    type Error = InvalidCoordinates;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(value: Coordinates) -> Self {
        value.as_pair()
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({}, {})", self.longitude, self.latitude)
    }
}

/// A place with a human-readable name and a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
    pub coordinates: Coordinates,
}

impl NamedLocation {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_values() {
        assert!(Coordinates::new(180.0, 90.0).is_ok());
        assert!(Coordinates::new(-180.0, -90.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = Coordinates::new(200.0, 10.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinates: longitude must be between -180 and 180"
        );

        let err = Coordinates::new(10.0, -91.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinates: latitude must be between -90 and 90"
        );

        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn from_slice_requires_two_components() {
        assert!(Coordinates::from_slice(&[-87.6, 41.9]).is_ok());
        assert!(Coordinates::from_slice(&[-87.6]).is_err());
        assert!(Coordinates::from_slice(&[-87.6, 41.9, 0.0]).is_err());
    }

    #[test]
    fn serde_uses_lon_lat_array() {
        let c = Coordinates::new(-87.6, 41.9).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[-87.6,41.9]");

        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);

        assert!(serde_json::from_str::<Coordinates>("[500.0,0.0]").is_err());
    }

    #[test]
    fn micro_degree_key() {
        let c = Coordinates::new(-87.6298, 41.8781).unwrap();
        assert_eq!(c.micro_degrees(), (-87_629_800, 41_878_100));
    }
}
