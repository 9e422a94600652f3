//! OpenRouteService wire types.
//!
//! Only the fields the planner reads are modelled; everything else in the
//! responses is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, NamedLocation};

use super::error::RoutingError;

/// Body of a directions request.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    /// Waypoints as `[longitude, latitude]`.
    pub coordinates: Vec<[f64; 2]>,
}

/// Response from `/v2/directions/{profile}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub summary: RouteSummary,
}

/// Route totals.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSummary {
    /// Metres. Omitted by the API for zero-length routes.
    #[serde(default)]
    pub distance: f64,

    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

/// GeoJSON feature collection returned by the geocoding endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]` for point features.
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    /// Full display label, e.g. "Denver, CO, USA".
    pub label: Option<String>,
    /// Short name, e.g. "Denver".
    pub name: Option<String>,
}

impl Feature {
    /// Convert to a domain location, preferring the full label as the name.
    pub fn to_location(&self, fallback_name: &str) -> Result<NamedLocation, RoutingError> {
        let coordinates = Coordinates::from_slice(&self.geometry.coordinates)?;
        let name = self
            .properties
            .label
            .clone()
            .or_else(|| self.properties.name.clone())
            .unwrap_or_else(|| fallback_name.to_string());
        Ok(NamedLocation::new(name, coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_directions_response() {
        let json = r#"{
            "bbox": [-105.0, 39.7, -87.6, 41.9],
            "routes": [{
                "summary": {"distance": 1609344.0, "duration": 54000.0},
                "segments": [],
                "way_points": [0, 120]
            }],
            "metadata": {"service": "routing"}
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].summary.distance, 1609344.0);
    }

    #[test]
    fn missing_routes_is_empty() {
        let response: DirectionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.routes.is_empty());
    }

    #[test]
    fn parse_geocode_feature() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-104.99, 39.74]},
                "properties": {"name": "Denver", "label": "Denver, CO, USA"}
            }]
        }"#;

        let collection: FeatureCollection = serde_json::from_str(json).unwrap();
        let location = collection.features[0].to_location("denver").unwrap();
        assert_eq!(location.name, "Denver, CO, USA");
        assert_eq!(location.coordinates.latitude(), 39.74);
    }

    #[test]
    fn feature_name_falls_back() {
        let json = r#"{"geometry": {"coordinates": [-87.63, 41.88]}}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();

        let location = feature.to_location("chicago").unwrap();
        assert_eq!(location.name, "chicago");
    }

    #[test]
    fn feature_with_bad_geometry_is_rejected() {
        let json = r#"{"geometry": {"coordinates": [-87.63]}, "properties": {}}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();

        assert!(matches!(
            feature.to_location("x"),
            Err(RoutingError::BadCoordinates(_))
        ));
    }
}
