//! Rate-limited retrieval across a list of mirrors.
//!
//! Each pass walks the mirrors in priority order, probing the status page
//! before sending a query. A mirror without free slots is skipped, a failed
//! query moves on to the next mirror, and the first successful reply ends
//! the retrieval. When a pass comes up empty every mirror is probed again,
//! the loop waits for the shortest announced slot wait, and starts over.
//! There is no retry limit.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::countdown::Countdown;
use super::executor::{QueryExecutor, QueryOutcome};
use super::mirror::Mirror;
use super::status::{StatusProbe, DEFAULT_WAIT_SECONDS};
use super::transport::Transport;
use super::OverpassError;
use crate::models::OverpassResponse;

pub struct RetrievalLoop {
    mirrors: Vec<Mirror>,
    probe: StatusProbe,
    executor: QueryExecutor,
    countdown: Arc<dyn Countdown>,
}

impl RetrievalLoop {
    /// Create a loop over `mirrors`, tried in the given order.
    pub fn new(
        mirrors: Vec<Mirror>,
        transport: Arc<dyn Transport>,
        countdown: Arc<dyn Countdown>,
    ) -> Result<Self, OverpassError> {
        if mirrors.is_empty() {
            return Err(OverpassError::NoMirrors);
        }

        Ok(Self {
            mirrors,
            probe: StatusProbe::new(transport.clone()),
            executor: QueryExecutor::new(transport),
            countdown,
        })
    }

    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    /// Run `query` until some mirror answers it.
    ///
    /// Only a malformed 200 reply ends the call with an error; everything
    /// else is retried.
    pub async fn retrieve(&self, query: &str) -> Result<Value, OverpassError> {
        self.retrieve_after(query, 0).await
    }

    /// Like [`retrieve`](Self::retrieve), but wait `initial_wait` seconds
    /// before the first pass.
    pub async fn retrieve_after(
        &self,
        query: &str,
        initial_wait: u64,
    ) -> Result<Value, OverpassError> {
        let mut wait = initial_wait;
        let mut pass: u64 = 0;

        loop {
            if wait > 0 {
                info!("Waiting for {} seconds", wait);
                self.countdown.wait(wait).await;
            }

            pass += 1;
            debug!("Retrieval pass {}", pass);

            if let Some(payload) = self.run_pass(query).await? {
                info!("Query successful!");
                return Ok(payload);
            }

            wait = self.shortest_wait().await;
            info!("No mirror answered in pass {}, retrying...", pass);
        }
    }

    /// Retrieve and decode the `elements` array.
    pub async fn retrieve_elements(
        &self,
        query: &str,
    ) -> Result<OverpassResponse, OverpassError> {
        let response = OverpassResponse::from_value(self.retrieve(query).await?)?;
        if let Some(remark) = &response.remark {
            warn!("Overpass remark: {}", remark);
        }
        Ok(response)
    }

    /// One walk over the mirror list
    async fn run_pass(&self, query: &str) -> Result<Option<Value>, OverpassError> {
        for mirror in &self.mirrors {
            let status = self.probe.check(mirror).await;
            if !status.available {
                debug!("No free slot on {}, skipping", mirror);
                continue;
            }

            match self.executor.execute(query, mirror).await? {
                QueryOutcome::Success(payload) => return Ok(Some(payload)),
                QueryOutcome::Failure {
                    status_code,
                    reason,
                } => {
                    warn!(
                        "No data was acquired from {}, Status Code: {}{}",
                        mirror,
                        status_code,
                        reason.map(|r| format!(" ({})", r)).unwrap_or_default()
                    );
                }
            }
        }

        Ok(None)
    }

    /// Re-probe every mirror and return the smallest announced wait
    async fn shortest_wait(&self) -> u64 {
        let mut shortest: Option<u64> = None;
        for mirror in &self.mirrors {
            let status = self.probe.check(mirror).await;
            shortest = Some(
                shortest.map_or(status.wait_seconds, |w| w.min(status.wait_seconds)),
            );
        }
        shortest.unwrap_or(DEFAULT_WAIT_SECONDS)
    }
}
