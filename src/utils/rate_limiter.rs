use governor::{Quota, RateLimiter as GovernorRateLimiter};
use nonzero_ext::*;
use std::time::Duration;
use tokio::time::sleep;

/// Pacing between remote calls. The search API is rate limited; this is a
/// fixed inter-request delay, not a retry policy.
pub struct RateLimiter {
    limiter: GovernorRateLimiter<
        governor::state::direct::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
    delay: Duration,
}

impl RateLimiter {
    /// Create a rate limiter with a minimum delay between requests
    pub fn with_delay(delay: Duration) -> Self {
        let quota = Quota::per_second(nonzero!(1u32));
        Self {
            limiter: GovernorRateLimiter::direct(quota),
            delay,
        }
    }

    /// Wait until the next request is allowed
    pub async fn wait(&self) {
        while self.limiter.check().is_err() {
            sleep(Duration::from_millis(100)).await;
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}
