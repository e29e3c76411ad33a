//! Slot availability from a mirror's `status` page.
//!
//! A typical status page looks like:
//!
//! ```text
//! Connected as: 1681177343
//! Current time: 2024-05-01T12:00:00Z
//! Announced endpoint: z.overpass-api.de/api/
//! Rate limit: 2
//! Slot available after: 2024-05-01T12:00:07Z, in 7 seconds.
//! Slot available after: 2024-05-01T12:00:21Z, in 21 seconds.
//! Currently running queries (pid, space limit, time limit, start time):
//! ```
//!
//! or, when the client still has capacity, a line such as
//! `2 slots available now.`

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::mirror::Mirror;
use super::transport::Transport;

/// Wait used when the status page does not announce one.
pub const DEFAULT_WAIT_SECONDS: u64 = 5;

const SLOTS_AVAILABLE: &str = "slots available";
const SLOT_AVAILABLE_AFTER: &str = "Slot available after";

/// First whitespace-delimited integer on a line
static WAIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s(\d+)\s").unwrap());
static SLOT_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+slots available").unwrap());

/// Capacity of one mirror at the time it was probed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotStatus {
    pub available: bool,
    pub wait_seconds: u64,
}

impl SlotStatus {
    /// Status assumed for a mirror whose status page could not be read
    pub const fn unreachable() -> Self {
        Self {
            available: false,
            wait_seconds: DEFAULT_WAIT_SECONDS,
        }
    }
}

/// Parse the text of a status page.
///
/// Any line containing `slots available` marks the mirror available, unless
/// that line starts its count with an explicit zero. Every
/// `Slot available after` line contributes its first embedded integer, and
/// the smallest one becomes `wait_seconds`.
pub fn parse_status(text: &str) -> SlotStatus {
    let mut available = false;
    let mut wait: Option<u64> = None;

    for line in text.lines() {
        if line.contains(SLOTS_AVAILABLE) {
            let zero = SLOT_COUNT_RE
                .captures(line)
                .and_then(|c| c[1].parse::<u64>().ok())
                .is_some_and(|n| n == 0);
            if !zero {
                available = true;
            }
        }

        if line.contains(SLOT_AVAILABLE_AFTER) {
            if let Some(seconds) = WAIT_RE
                .captures(line)
                .and_then(|c| c[1].parse::<u64>().ok())
            {
                wait = Some(wait.map_or(seconds, |w| w.min(seconds)));
            }
        }
    }

    SlotStatus {
        available,
        wait_seconds: wait.unwrap_or(DEFAULT_WAIT_SECONDS),
    }
}

/// Reads and parses a mirror's status page
#[derive(Clone)]
pub struct StatusProbe {
    transport: Arc<dyn Transport>,
}

impl StatusProbe {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Probe one mirror.
    ///
    /// The status body is parsed whatever the HTTP status code. A mirror
    /// whose status page cannot be fetched counts as unavailable with the
    /// default wait.
    pub async fn check(&self, mirror: &Mirror) -> SlotStatus {
        match self.transport.get(mirror.status_url()).await {
            Ok(reply) => {
                let status = parse_status(&reply.body);
                debug!(
                    "{}: available={} wait={}s",
                    mirror, status.available, status.wait_seconds
                );
                status
            }
            Err(e) => {
                warn!("Could not read status of {}: {}", mirror, e);
                SlotStatus::unreachable()
            }
        }
    }
}
