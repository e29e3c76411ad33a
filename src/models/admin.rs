//! Administrative boundary types returned by the states/counties queries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::element::RawElement;

/// OSM admin_level mapping to semantic level names.
/// See: https://wiki.openstreetmap.org/wiki/Tag:boundary%3Dadministrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    /// Region / state / province (admin_level=4)
    Region,
    /// County / district (admin_level=6)
    County,
}

impl AdminLevel {
    /// Convert OSM admin_level number to AdminLevel
    pub fn from_osm_level(level: u8) -> Option<Self> {
        match level {
            4 => Some(AdminLevel::Region),
            6 => Some(AdminLevel::County),
            _ => None,
        }
    }

    /// Get the OSM admin_level number
    pub fn to_osm_level(&self) -> u8 {
        match self {
            AdminLevel::Region => 4,
            AdminLevel::County => 6,
        }
    }

    /// Get the field name for this level
    pub fn field_name(&self) -> &'static str {
        match self {
            AdminLevel::Region => "region",
            AdminLevel::County => "county",
        }
    }
}

/// An administrative area with multilingual names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminArea {
    /// OSM relation ID
    pub osm_id: i64,

    /// Admin level
    pub level: AdminLevel,

    /// ISO 3166-2 subdivision code (e.g., "DE-BW"), present on states
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Multilingual names: {"default": "...", "de": "...", "fr": "..."}
    pub name: HashMap<String, String>,
}

impl AdminArea {
    /// Build an area from a boundary relation fetched with `out tags;`.
    ///
    /// The level comes from the `admin_level` tag and falls back to
    /// `fallback` when the tag is missing or outside the supported levels.
    pub fn from_element(element: &RawElement, fallback: AdminLevel) -> Self {
        let level = element
            .tag("admin_level")
            .and_then(|l| l.parse::<u8>().ok())
            .and_then(AdminLevel::from_osm_level)
            .unwrap_or(fallback);

        let mut name = HashMap::new();
        for (key, value) in &element.tags {
            if key == "name" {
                name.insert("default".to_string(), value.clone());
            } else if let Some(lang) = key.strip_prefix("name:") {
                name.insert(lang.to_string(), value.clone());
            }
        }

        Self {
            osm_id: element.id,
            level,
            code: element.tag("ISO3166-2").map(str::to_string),
            name,
        }
    }

    /// Get default name
    pub fn default_name(&self) -> Option<&String> {
        self.name.get("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OsmType;
    use std::collections::BTreeMap;

    fn relation(tags: &[(&str, &str)]) -> RawElement {
        RawElement {
            id: 62611,
            osm_type: OsmType::Relation,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            lat: None,
            lon: None,
            center: None,
        }
    }

    #[test]
    fn test_state_from_relation() {
        let area = AdminArea::from_element(
            &relation(&[
                ("admin_level", "4"),
                ("ISO3166-2", "DE-BW"),
                ("name", "Baden-Württemberg"),
                ("name:en", "Baden-Wurttemberg"),
            ]),
            AdminLevel::County,
        );

        assert_eq!(area.level, AdminLevel::Region);
        assert_eq!(area.code.as_deref(), Some("DE-BW"));
        assert_eq!(area.default_name().unwrap(), "Baden-Württemberg");
        assert_eq!(area.name["en"], "Baden-Wurttemberg");
    }

    #[test]
    fn test_level_fallback() {
        let area =
            AdminArea::from_element(&relation(&[("name", "Ortenaukreis")]), AdminLevel::County);
        assert_eq!(area.level, AdminLevel::County);
        assert!(area.code.is_none());
    }

    #[test]
    fn test_osm_level_round_trip() {
        for level in [AdminLevel::Region, AdminLevel::County] {
            assert_eq!(AdminLevel::from_osm_level(level.to_osm_level()), Some(level));
        }
        assert_eq!(AdminLevel::from_osm_level(8), None);
    }
}
