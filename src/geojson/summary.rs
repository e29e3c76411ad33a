//! Extent and composition of a harvested collection.

use std::collections::BTreeMap;
use std::fmt;

use geo::{BoundingRect, Centroid};
use geo_types::{MultiPoint, Point, Rect};

use crate::models::FeatureCollection;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    /// Feature count per OSM type ("node", "way", "relation")
    pub by_type: BTreeMap<String, usize>,
    pub extent: Option<Rect<f64>>,
    pub centroid: Option<Point<f64>>,
}

pub fn summarize(collection: &FeatureCollection) -> Summary {
    let mut by_type = BTreeMap::new();
    for feature in &collection.features {
        *by_type.entry(feature.id_type.to_string()).or_insert(0) += 1;
    }

    let points: MultiPoint<f64> = collection
        .features
        .iter()
        .map(|f| Point::new(f.geometry.lon(), f.geometry.lat()))
        .collect();

    Summary {
        total: collection.features.len(),
        by_type,
        extent: points.bounding_rect(),
        centroid: points.centroid(),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self
            .by_type
            .iter()
            .map(|(t, n)| format!("{} {}", n, t))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} features", self.total)?;
        if !types.is_empty() {
            write!(f, " ({})", types)?;
        }
        if let Some(rect) = self.extent {
            write!(
                f,
                ", lon {:.4}..{:.4}, lat {:.4}..{:.4}",
                rect.min().x,
                rect.max().x,
                rect.min().y,
                rect.max().y
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::normalize;
    use crate::models::{GeoPoint, OsmType, RawElement};

    #[test]
    fn test_summary_of_mixed_collection() {
        let collection = normalize(
            vec![
                RawElement::node(1, 48.0, 8.0),
                RawElement::node(2, 50.0, 10.0),
                RawElement::centered(3, OsmType::Way, GeoPoint { lat: 49.0, lon: 9.0 }),
            ],
            Some("2024-05-01T00:00:00Z"),
        )
        .unwrap();

        let summary = summarize(&collection);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_type["node"], 2);
        assert_eq!(summary.by_type["way"], 1);
        let extent = summary.extent.unwrap();
        assert_eq!(extent.min().x, 8.0);
        assert_eq!(extent.max().y, 50.0);
        let centroid = summary.centroid.unwrap();
        assert!((centroid.x() - 9.0).abs() < 1e-9);
        assert!((centroid.y() - 49.0).abs() < 1e-9);
        assert_eq!(
            summary.to_string(),
            "3 features (2 node, 1 way), lon 8.0000..10.0000, lat 48.0000..50.0000"
        );
    }

    #[test]
    fn test_summary_of_empty_collection() {
        let summary = summarize(&normalize(vec![], None).unwrap());
        assert_eq!(summary.total, 0);
        assert!(summary.extent.is_none());
        assert!(summary.centroid.is_none());
        assert_eq!(summary.to_string(), "0 features");
    }
}
