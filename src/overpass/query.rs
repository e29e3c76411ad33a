//! Overpass QL templates for the supported datasets.

use crate::models::AdminLevel;

pub const DEFAULT_COUNTRY: &str = "DE";
pub const DEFAULT_STATE: &str = "DE-BW";

/// Case-insensitive pattern matching climbing in German and English
const CLIMBING_PATTERN: &str = "^.*(kletter|boulder|climb).*$";

/// States (admin_level=4) within a country, tags only.
///
/// Only relations whose `ISO3166-2` code matches the country are kept,
/// which drops enclaves and neighbouring boundaries touching the area.
pub fn states(country_code: &str) -> String {
    format!(
        r#"[out:json];
area["ISO3166-1"="{country}"]->.searchArea;
rel["admin_level"="{level}"]["boundary"="administrative"]["ISO3166-2"~"{country}"](area.searchArea);
out tags;"#,
        country = country_code,
        level = AdminLevel::Region.to_osm_level(),
    )
}

/// Counties (admin_level=6) within a state, tags only
pub fn counties(state_code: &str) -> String {
    format!(
        r#"[out:json];
area["ISO3166-2"="{state}"]->.searchArea;
relation["admin_level"={level}]["boundary"="administrative"](area.searchArea);
out tags;"#,
        state = state_code,
        level = AdminLevel::County.to_osm_level(),
    )
}

/// Sports centres with a climbing sport tag across a whole country
pub fn facilities_basic(country_code: &str) -> String {
    format!(
        r#"[out:json];
area["ISO3166-1"="{country}"]->.searchArea;
nwr[leisure=sports_centre][sport~"{pattern}",i](area.searchArea);
out center;"#,
        country = country_code,
        pattern = CLIMBING_PATTERN,
    )
}

/// Climbing facilities within one state.
///
/// Union of three branches: buildings named like a climbing gym, buildings
/// with a climbing sport tag, and sports centres with a climbing sport tag.
/// An element matching several branches appears once per branch in the
/// reply; no deduplication happens downstream.
pub fn facilities_advanced(state_code: &str) -> String {
    format!(
        r#"[out:json][maxsize:2000000000][timeout:300];
area["ISO3166-2"="{state}"]->.searchArea;
(nwr[name~"{pattern}",i][building](area.searchArea);
nwr[sport~"{pattern}",i][building](area.searchArea);
nwr[leisure=sports_centre][sport~"{pattern}",i](area.searchArea););
out center;"#,
        state = state_code,
        pattern = CLIMBING_PATTERN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_query() {
        let q = states("AT");
        assert!(q.starts_with("[out:json];"));
        assert!(q.contains(r#"area["ISO3166-1"="AT"]"#));
        assert!(q.contains(r#"["admin_level"="4"]"#));
        assert!(q.contains(r#"["ISO3166-2"~"AT"]"#));
        assert!(q.ends_with("out tags;"));
    }

    #[test]
    fn test_counties_query() {
        let q = counties(DEFAULT_STATE);
        assert!(q.contains(r#"area["ISO3166-2"="DE-BW"]"#));
        assert!(q.contains(r#"["admin_level"=6]"#));
        assert!(q.ends_with("out tags;"));
    }

    #[test]
    fn test_basic_facilities_query() {
        let q = facilities_basic(DEFAULT_COUNTRY);
        assert!(q.starts_with("[out:json];"));
        assert!(q.contains(
            r#"nwr[leisure=sports_centre][sport~"^.*(kletter|boulder|climb).*$",i]"#
        ));
        assert!(q.ends_with("out center;"));
    }

    #[test]
    fn test_advanced_facilities_query() {
        let q = facilities_advanced("DE-BY");
        assert!(q.starts_with("[out:json][maxsize:2000000000][timeout:300];"));
        assert!(q.contains(r#"area["ISO3166-2"="DE-BY"]"#));
        assert_eq!(q.matches("(area.searchArea)").count(), 3);
        assert_eq!(q.matches("[building]").count(), 2);
        assert!(q.ends_with("out center;"));
    }
}
