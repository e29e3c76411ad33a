//! GeoJSON document structure written to disk.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::element::{OsmType, RawElement};
use crate::overpass::OverpassError;

pub const CRS_NAME: &str = "EPSG:4326";
pub const GENERATOR: &str = "overpass-api";
pub const COPYRIGHT: &str = "The data included in this document is from www.openstreetmap.org. \
                             The data is made available under ODbL.";

/// Named coordinate reference system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    #[serde(rename = "type")]
    pub crs_type: String,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsProperties {
    pub name: String,
}

impl Default for Crs {
    fn default() -> Self {
        Self {
            crs_type: "name".to_string(),
            properties: CrsProperties {
                name: CRS_NAME.to_string(),
            },
        }
    }
}

/// Point geometry, coordinates ordered `[lon, lat]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub geo_type: String,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            geo_type: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// A single point feature built from one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,

    /// OSM object ID
    pub id: i64,

    /// OSM object type
    pub id_type: OsmType,

    pub geometry: PointGeometry,

    /// Element tags plus the injected `id` and `type` keys
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Build a feature from an element that has a position.
    ///
    /// Tags named `id` or `type` are overwritten by the element's identity.
    pub fn from_element(element: &RawElement) -> Result<Self, OverpassError> {
        let position = element
            .position()
            .ok_or(OverpassError::MissingCoordinates { id: element.id })?;

        let mut properties: Map<String, Value> = element
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        properties.insert("id".to_string(), Value::from(element.id));
        properties.insert(
            "type".to_string(),
            Value::String(element.osm_type.to_string()),
        );

        Ok(Self {
            feature_type: "Feature".to_string(),
            id: element.id,
            id_type: element.osm_type,
            geometry: PointGeometry::new(position.lon, position.lat),
            properties,
        })
    }
}

/// Top-level GeoJSON document.
///
/// Field order matches the serialized layout: type, crs, generator,
/// copyright, timestamp, features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub crs: Crs,
    pub generator: String,
    pub copyright: String,
    /// ISO-8601 UTC, second precision, `Z` suffix
    pub timestamp: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create a collection with the fixed OSM metadata
    pub fn new(timestamp: String, features: Vec<Feature>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            crs: Crs::default(),
            generator: GENERATOR.to_string(),
            copyright: COPYRIGHT.to_string(),
            timestamp,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use serde_json::json;

    #[test]
    fn test_feature_injects_identity() {
        let element = RawElement::node(1, 48.0, 8.0).with_tag("sport", "climbing");
        let feature = Feature::from_element(&element).unwrap();

        assert_eq!(feature.geometry.coordinates, [8.0, 48.0]);
        assert_eq!(feature.properties["id"], json!(1));
        assert_eq!(feature.properties["type"], json!("node"));
        assert_eq!(feature.properties["sport"], json!("climbing"));
    }

    #[test]
    fn test_feature_overwrites_colliding_tags() {
        let element = RawElement::centered(5, OsmType::Way, GeoPoint { lat: 1.0, lon: 2.0 })
            .with_tag("id", "not-an-id")
            .with_tag("type", "multipolygon");
        let feature = Feature::from_element(&element).unwrap();

        assert_eq!(feature.properties.len(), 2);
        assert_eq!(feature.properties["id"], json!(5));
        assert_eq!(feature.properties["type"], json!("way"));
    }

    #[test]
    fn test_collection_serializes_metadata() {
        let collection = FeatureCollection::new("2024-05-01T12:00:00Z".to_string(), vec![]);
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["crs"]["type"], "name");
        assert_eq!(value["crs"]["properties"]["name"], "EPSG:4326");
        assert_eq!(value["generator"], "overpass-api");
        assert!(value["copyright"].as_str().unwrap().ends_with("under ODbL."));
        assert_eq!(value["features"], json!([]));
    }

    #[test]
    fn test_feature_serialized_layout() {
        let feature = Feature::from_element(&RawElement::node(1, 48.0, 8.0)).unwrap();
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "id": 1,
                "id_type": "node",
                "geometry": {"type": "Point", "coordinates": [8.0, 48.0]},
                "properties": {"id": 1, "type": "node"}
            })
        );
    }
}
