//! Single query attempt against one mirror's interpreter endpoint.

use std::sync::Arc;

use chrono::Local;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::mirror::Mirror;
use super::transport::Transport;
use super::OverpassError;

/// Status code reported when the interpreter could not be reached at all.
pub const NETWORK_ERROR_STATUS: u16 = 500;

/// Result of one interpreter request
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// HTTP 200 with a parsed JSON body
    Success(Value),
    /// Non-200 reply, or a network failure mapped to status 500
    Failure {
        status_code: u16,
        reason: Option<String>,
    },
}

impl QueryOutcome {
    pub fn network_error() -> Self {
        QueryOutcome::Failure {
            status_code: NETWORK_ERROR_STATUS,
            reason: Some("network error".to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success(_))
    }
}

/// Sends Overpass QL to an interpreter endpoint
#[derive(Clone)]
pub struct QueryExecutor {
    transport: Arc<dyn Transport>,
}

impl QueryExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Run `query` on `mirror`.
    ///
    /// Network failures never escape this call; they come back as
    /// [`QueryOutcome::network_error`]. A 200 reply whose body is not JSON is
    /// returned as [`OverpassError::Parse`].
    pub async fn execute(
        &self,
        query: &str,
        mirror: &Mirror,
    ) -> Result<QueryOutcome, OverpassError> {
        let mut url = mirror.interpreter_url().clone();
        url.query_pairs_mut().append_pair("data", query);

        info!(
            "Querying {}... Current Time: {}",
            mirror.interpreter_url(),
            Local::now().format("%H:%M:%S")
        );
        debug!("Query: {}", query);

        let reply = match self.transport.get(&url).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Interpreter request failed: {}", e);
                return Ok(QueryOutcome::network_error());
            }
        };

        if !reply.is_ok() {
            return Ok(QueryOutcome::Failure {
                status_code: reply.status,
                reason: None,
            });
        }

        let payload: Value = serde_json::from_str(&reply.body)?;
        Ok(QueryOutcome::Success(payload))
    }
}
