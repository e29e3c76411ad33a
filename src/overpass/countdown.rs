//! Blocking wait between retrieval passes.

use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

/// Suspends retrieval for a whole number of seconds
#[async_trait]
pub trait Countdown: Send + Sync {
    async fn wait(&self, seconds: u64);
}

/// Countdown that shows the remaining seconds on a progress bar.
///
/// The bar is hidden automatically when stderr is not a terminal; the wait
/// still happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressCountdown;

impl ProgressCountdown {
    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} waiting for slot [{bar:40.cyan/blue}] {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

#[async_trait]
impl Countdown for ProgressCountdown {
    async fn wait(&self, seconds: u64) {
        let pb = ProgressBar::new(seconds);
        pb.set_style(Self::style());
        pb.set_message(format!("{:03}s left", seconds));

        for remaining in (0..seconds).rev() {
            tokio::time::sleep(Duration::from_secs(1)).await;
            pb.inc(1);
            pb.set_message(format!("{:03}s left", remaining));
        }

        pb.finish_and_clear();
    }
}
