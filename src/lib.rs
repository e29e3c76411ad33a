//! Cragscout - climbing facility harvester for the Overpass API
//!
//! This library provides the rate-limited Overpass client, the GeoJSON
//! conversion and the dataset queries used by the `harvest` binary.

pub mod config;
pub mod dataset;
pub mod geojson;
pub mod models;
pub mod overpass;

#[doc(hidden)]
pub mod test_support;

pub use dataset::{DatasetClient, HarvestMode};
pub use models::{Feature, FeatureCollection, OsmType, RawElement};
pub use overpass::{Mirror, OverpassError, RetrievalLoop};
