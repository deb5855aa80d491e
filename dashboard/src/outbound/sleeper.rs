//! Tokio-based latency sleeper.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::LatencySleeper;

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl LatencySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
