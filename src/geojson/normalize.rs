use chrono::{DateTime, Utc};

use crate::models::{Feature, FeatureCollection, RawElement};
use crate::overpass::OverpassError;

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`
pub fn utc_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Turn raw elements into a point FeatureCollection.
///
/// Ways and relations fetched with `out center;` get their center copied to
/// `lat`/`lon`. Order and duplicates are preserved. An empty or missing
/// `timestamp` means "now".
pub fn normalize(
    elements: Vec<RawElement>,
    timestamp: Option<&str>,
) -> Result<FeatureCollection, OverpassError> {
    let timestamp = match timestamp {
        Some(ts) if !ts.is_empty() => ts.to_string(),
        _ => utc_timestamp(Utc::now()),
    };

    let features = elements
        .into_iter()
        .map(|mut element| {
            element.lift_center()?;
            Feature::from_element(&element)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection::new(timestamp, features))
}
