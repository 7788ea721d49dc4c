//! Request throttling
//!
//! A fixed sleep before every outbound request. Not adaptive and not driven by
//! response headers.

use std::time::Duration;
use tracing::trace;

/// Default delay between requests
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(2);

/// Fixed-delay throttle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestThrottle {
    delay: Duration,
}

impl RequestThrottle {
    /// Create a throttle with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A throttle that never sleeps
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the configured delay
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        trace!("Throttling request for {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}
