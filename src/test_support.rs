//! Test doubles for the Overpass client.
//!
//! [`ScriptedTransport`] answers requests from per-endpoint queues without
//! touching the network, and records every URL it was asked for.
//! [`RecordingCountdown`] returns immediately and remembers each wait.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use url::Url;

use crate::overpass::{Countdown, HttpReply, Mirror, OverpassError, Transport};

#[derive(Debug, Clone)]
enum Scripted {
    Reply(HttpReply),
    Unreachable,
}

/// Transport replaying canned replies.
///
/// Replies are keyed by endpoint (the URL without its query string). Each
/// request pops the front of that endpoint's queue; the last entry is
/// sticky and answers every later request. Endpoints with nothing scripted
/// behave as unreachable.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<Url>>,
}

fn endpoint_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_query(None);
    key.to_string()
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, url: &Url, entry: Scripted) {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(endpoint_key(url))
            .or_default()
            .push_back(entry);
    }

    /// Queue a status page body for `mirror`
    pub fn push_status(&self, mirror: &Mirror, body: &str) {
        self.push(mirror.status_url(), Scripted::Reply(HttpReply::new(200, body)));
    }

    /// Queue an interpreter reply for `mirror`
    pub fn push_interpreter(&self, mirror: &Mirror, status: u16, body: &str) {
        self.push(
            mirror.interpreter_url(),
            Scripted::Reply(HttpReply::new(status, body)),
        );
    }

    /// Queue a connection failure for an endpoint
    pub fn push_unreachable(&self, url: &Url) {
        self.push(url, Scripted::Unreachable);
    }

    /// Every URL requested so far, in order, including query strings
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests made to an endpoint, ignoring query strings
    pub fn calls_to(&self, url: &Url) -> usize {
        let key = endpoint_key(url);
        self.requests()
            .iter()
            .filter(|u| endpoint_key(u) == key)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply, OverpassError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());

        let next = {
            let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
            scripts.get_mut(&endpoint_key(url)).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Unreachable) | None => Err(OverpassError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// Countdown that records requested waits instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingCountdown {
    waits: Mutex<Vec<u64>>,
}

impl RecordingCountdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<u64> {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Countdown for RecordingCountdown {
    async fn wait(&self, seconds: u64) {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_reply_is_sticky() {
        let mirror = Mirror::parse("https://a.example.org/api/").unwrap();
        let transport = ScriptedTransport::new();
        transport.push_status(&mirror, "first");
        transport.push_status(&mirror, "second");

        let url = mirror.status_url();
        assert_eq!(transport.get(url).await.unwrap().body, "first");
        assert_eq!(transport.get(url).await.unwrap().body, "second");
        assert_eq!(transport.get(url).await.unwrap().body, "second");
        assert_eq!(transport.calls_to(url), 3);
    }

    #[tokio::test]
    async fn test_unscripted_endpoint_is_unreachable() {
        let transport = ScriptedTransport::new();
        let url = Url::parse("https://nowhere.example.org/api/status").unwrap();
        assert!(matches!(
            transport.get(&url).await,
            Err(OverpassError::Transport { .. })
        ));
    }
}
