//! Raw Overpass elements as returned by the interpreter endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::overpass::OverpassError;

/// Type of OSM object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmType {
    Node,
    Way,
    Relation,
}

impl std::fmt::Display for OsmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsmType::Node => write!(f, "node"),
            OsmType::Way => write!(f, "way"),
            OsmType::Relation => write!(f, "relation"),
        }
    }
}

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A single node, way or relation.
///
/// Nodes carry `lat`/`lon` directly. Ways and relations fetched with
/// `out center;` carry a `center` object instead, and relations fetched with
/// `out tags;` carry no position at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub id: i64,

    #[serde(rename = "type")]
    pub osm_type: OsmType,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,
}

impl RawElement {
    /// Create a node at the given position with no tags
    pub fn node(id: i64, lat: f64, lon: f64) -> Self {
        Self {
            id,
            osm_type: OsmType::Node,
            tags: BTreeMap::new(),
            lat: Some(lat),
            lon: Some(lon),
            center: None,
        }
    }

    /// Create a way or relation summarized by its center point
    pub fn centered(id: i64, osm_type: OsmType, center: GeoPoint) -> Self {
        Self {
            id,
            osm_type,
            tags: BTreeMap::new(),
            lat: None,
            lon: None,
            center: Some(center),
        }
    }

    /// Builder-style tag insertion, mostly for fixtures.
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Top-level position if present, otherwise the center summary.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint { lat, lon }),
            _ => self.center,
        }
    }

    /// Copy the center summary up to `lat`/`lon` when they are missing.
    ///
    /// Elements that already carry top-level coordinates are left untouched,
    /// so applying this twice is harmless.
    pub fn lift_center(&mut self) -> Result<(), OverpassError> {
        if self.lat.is_some() && self.lon.is_some() {
            return Ok(());
        }

        let center = self
            .center
            .ok_or(OverpassError::MissingCoordinates { id: self.id })?;
        self.lat = Some(center.lat);
        self.lon = Some(center.lon);
        Ok(())
    }
}

/// Interpreter payload: the `elements` array plus an optional runtime remark.
///
/// Overpass reports server-side timeouts and memory exhaustion as a `remark`
/// on an otherwise successful (200) response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<RawElement>,

    #[serde(default)]
    pub remark: Option<String>,
}

impl OverpassResponse {
    /// Decode a raw interpreter payload into typed elements
    pub fn from_value(value: Value) -> Result<Self, OverpassError> {
        Ok(serde_json::from_value(value)?)
    }
}
