//! Suspension abstraction used to simulate backend latency.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the calling task, yielding to the event loop.
#[async_trait]
pub trait LatencySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    ///
    /// ```rust,no_run
    /// use async_trait::async_trait;
    /// use dashboard::domain::ports::LatencySleeper;
    /// use std::sync::{Arc, Mutex};
    /// use std::time::Duration;
    /// #[derive(Default)]
    /// struct CountingSleeper {
    ///     calls: Arc<Mutex<u32>>,
    /// }
    /// #[async_trait]
    /// impl LatencySleeper for CountingSleeper {
    ///     async fn sleep(&self, _duration: Duration) {
    ///         *self.calls.lock().expect("calls mutex") += 1;
    ///     }
    /// }
    /// # async fn demo() {
    /// let sleeper = CountingSleeper::default();
    /// sleeper.sleep(Duration::from_millis(25)).await;
    /// assert_eq!(*sleeper.calls.lock().expect("calls mutex"), 1);
    /// # }
    /// ```
    async fn sleep(&self, duration: Duration);
}
