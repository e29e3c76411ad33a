//! Core data models for Overpass elements and the GeoJSON output.

pub mod admin;
pub mod element;
pub mod feature;

pub use admin::{AdminArea, AdminLevel};
pub use element::{GeoPoint, OsmType, OverpassResponse, RawElement};
pub use feature::{Crs, Feature, FeatureCollection, PointGeometry};
