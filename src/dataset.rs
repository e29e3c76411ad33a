//! Named datasets built on top of the retrieval loop.

use tracing::info;

use crate::models::{AdminArea, AdminLevel, RawElement};
use crate::overpass::{query, OverpassError, RetrievalLoop};

/// How climbing facilities are collected for a country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestMode {
    /// One country-wide query for sports centres with a climbing sport tag
    Basic,
    /// One query per state, also matching climbing buildings by name or sport
    Advanced,
}

/// Fetches states, counties and climbing facilities one query at a time
pub struct DatasetClient {
    retrieval: RetrievalLoop,
}

impl DatasetClient {
    pub fn new(retrieval: RetrievalLoop) -> Self {
        Self { retrieval }
    }

    pub fn retrieval(&self) -> &RetrievalLoop {
        &self.retrieval
    }

    async fn elements(&self, query: &str) -> Result<Vec<RawElement>, OverpassError> {
        Ok(self.retrieval.retrieve_elements(query).await?.elements)
    }

    /// State boundary relations of a country (tags only)
    pub async fn states(&self, country_code: &str) -> Result<Vec<RawElement>, OverpassError> {
        self.elements(&query::states(country_code)).await
    }

    /// County boundary relations of a state (tags only)
    pub async fn counties(&self, state_code: &str) -> Result<Vec<RawElement>, OverpassError> {
        self.elements(&query::counties(state_code)).await
    }

    pub async fn facilities_basic(
        &self,
        country_code: &str,
    ) -> Result<Vec<RawElement>, OverpassError> {
        info!("Getting climbing facilities for: {}", country_code);
        self.elements(&query::facilities_basic(country_code)).await
    }

    pub async fn facilities_advanced(
        &self,
        state_code: &str,
    ) -> Result<Vec<RawElement>, OverpassError> {
        info!("Getting climbing facilities for: {}", state_code);
        self.elements(&query::facilities_advanced(state_code)).await
    }

    /// All climbing facilities of a country.
    ///
    /// In advanced mode the states are fetched first and each state's
    /// facilities are appended in state order. Facilities matched by several
    /// query branches, or lying on a state border, may appear more than once.
    pub async fn climbing_facilities(
        &self,
        country_code: &str,
        mode: HarvestMode,
    ) -> Result<Vec<RawElement>, OverpassError> {
        let data = match mode {
            HarvestMode::Basic => self.facilities_basic(country_code).await?,
            HarvestMode::Advanced => {
                info!("Getting states...");
                let states = self.states(country_code).await?;
                let codes = state_codes(&states)?;
                info!("Found {} states", codes.len());

                let mut data = Vec::new();
                for code in &codes {
                    data.extend(self.facilities_advanced(code).await?);
                }
                data
            }
        };

        info!("Finished with {} elements", data.len());
        Ok(data)
    }
}

/// `ISO3166-2` codes of state relations, in reply order
pub fn state_codes(states: &[RawElement]) -> Result<Vec<String>, OverpassError> {
    states
        .iter()
        .map(|state| {
            AdminArea::from_element(state, AdminLevel::Region)
                .code
                .ok_or(OverpassError::MissingStateCode { id: state.id })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OsmType;
    use crate::overpass::Mirror;
    use crate::test_support::{RecordingCountdown, ScriptedTransport};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn state(id: i64, code: Option<&str>) -> RawElement {
        let mut tags = BTreeMap::new();
        tags.insert("admin_level".to_string(), "4".to_string());
        if let Some(code) = code {
            tags.insert("ISO3166-2".to_string(), code.to_string());
        }
        RawElement {
            id,
            osm_type: OsmType::Relation,
            tags,
            lat: None,
            lon: None,
            center: None,
        }
    }

    #[test]
    fn test_state_codes_in_order() {
        let codes = state_codes(&[state(1, Some("DE-BW")), state(2, Some("DE-BY"))]).unwrap();
        assert_eq!(codes, vec!["DE-BW", "DE-BY"]);
    }

    #[test]
    fn test_state_without_code() {
        let err = state_codes(&[state(1, Some("DE-BW")), state(2, None)]).unwrap_err();
        assert!(matches!(err, OverpassError::MissingStateCode { id: 2 }));
    }

    #[tokio::test]
    async fn test_basic_mode_runs_single_query() {
        let mirror = Mirror::parse("https://a.example.org/api/").unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status(&mirror, "2 slots available now.");
        transport.push_interpreter(
            &mirror,
            200,
            r#"{"elements":[{"type":"node","id":1,"lat":48.0,"lon":8.0,"tags":{"sport":"climbing"}}]}"#,
        );
        let retrieval = RetrievalLoop::new(
            vec![mirror.clone()],
            transport.clone(),
            Arc::new(RecordingCountdown::new()),
        )
        .unwrap();

        let data = DatasetClient::new(retrieval)
            .climbing_facilities("DE", HarvestMode::Basic)
            .await
            .unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(transport.calls_to(mirror.interpreter_url()), 1);
        let requests = transport.requests();
        let (_, query) = requests[1].query_pairs().next().unwrap();
        assert!(query.contains("leisure=sports_centre"));
    }

    #[tokio::test]
    async fn test_advanced_mode_queries_each_state() {
        let mirror = Mirror::parse("https://a.example.org/api/").unwrap();
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_status(&mirror, "2 slots available now.");
        transport.push_interpreter(
            &mirror,
            200,
            r#"{"elements":[
                {"type":"relation","id":10,"tags":{"ISO3166-2":"DE-BW"}},
                {"type":"relation","id":11,"tags":{"ISO3166-2":"DE-BY"}}
            ]}"#,
        );
        transport.push_interpreter(
            &mirror,
            200,
            r#"{"elements":[{"type":"way","id":1,"center":{"lat":48.0,"lon":9.0}}]}"#,
        );
        transport.push_interpreter(
            &mirror,
            200,
            r#"{"elements":[
                {"type":"node","id":2,"lat":48.1,"lon":11.5},
                {"type":"node","id":2,"lat":48.1,"lon":11.5}
            ]}"#,
        );
        let retrieval = RetrievalLoop::new(
            vec![mirror.clone()],
            transport.clone(),
            Arc::new(RecordingCountdown::new()),
        )
        .unwrap();

        let data = DatasetClient::new(retrieval)
            .climbing_facilities("DE", HarvestMode::Advanced)
            .await
            .unwrap();

        let ids: Vec<i64> = data.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 2]);
        assert_eq!(transport.calls_to(mirror.interpreter_url()), 3);

        let queries: Vec<String> = transport
            .requests()
            .iter()
            .filter_map(|u| u.query_pairs().next().map(|(_, q)| q.into_owned()))
            .collect();
        assert!(queries[0].contains("out tags;"));
        assert!(queries[1].contains(r#"area["ISO3166-2"="DE-BW"]"#));
        assert!(queries[2].contains(r#"area["ISO3166-2"="DE-BY"]"#));
    }
}
