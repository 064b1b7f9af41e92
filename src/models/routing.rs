//! OpenRouteService data models
//!
//! Only the GeoJSON fields the client reads are modeled

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GeoJSON feature collection returned by geocode and directions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Value,
}

/// Point (`[lon, lat]`) or line string (`[[lon, lat], ...]`) geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Vec<f64>),
    LineString(Vec<Vec<f64>>),
}

/// `[lon, lat]` pair as used on the wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    fn from_slice(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self { lon: *lon, lat: *lat }),
            _ => None,
        }
    }

    /// `lon,lat` query parameter form
    pub fn to_query(self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

impl FeatureCollection {
    /// Position of the first point feature
    pub fn first_point(&self) -> Option<LonLat> {
        self.features.iter().find_map(|feature| match &feature.geometry {
            Geometry::Point(position) => LonLat::from_slice(position),
            Geometry::LineString(_) => None,
        })
    }

    /// Positions of the first line feature, converted to `[lat, lon]`
    pub fn first_line_lat_lon(&self) -> Option<Vec<[f64; 2]>> {
        self.features.iter().find_map(|feature| match &feature.geometry {
            Geometry::LineString(positions) => Some(
                positions
                    .iter()
                    .filter_map(|p| LonLat::from_slice(p))
                    .map(|p| [p.lat, p.lon])
                    .collect(),
            ),
            Geometry::Point(_) => None,
        })
    }
}

/// Route drawn between two geocoded places
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Polyline in `[lat, lon]` order
    pub coords: Vec<[f64; 2]>,
    /// Raw directions response
    pub route: FeatureCollection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_and_line_parsing() {
        let geocode: FeatureCollection = serde_json::from_value(json!({
            "features": [
                {"geometry": {"type": "Point", "coordinates": [76.2673, 9.9312]}, "properties": {"label": "Kochi"}}
            ]
        }))
        .unwrap();
        let point = geocode.first_point().unwrap();
        assert_eq!(point.lon, 76.2673);
        assert_eq!(point.to_query(), "76.2673,9.9312");

        let directions: FeatureCollection = serde_json::from_value(json!({
            "features": [
                {"geometry": {"type": "LineString", "coordinates": [[76.0, 9.0], [76.5, 9.5, 12.0]]}}
            ]
        }))
        .unwrap();
        assert_eq!(
            directions.first_line_lat_lon().unwrap(),
            vec![[9.0, 76.0], [9.5, 76.5]]
        );
    }

    #[test]
    fn test_missing_features() {
        let empty: FeatureCollection = serde_json::from_value(json!({"type": "FeatureCollection"})).unwrap();
        assert!(empty.first_point().is_none());
        assert!(empty.first_line_lat_lon().is_none());
    }
}
