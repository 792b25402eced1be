use tokio::time::{interval, Duration};

use crate::limiter::rate_limiter::SubmissionLimiter;

/// Periodically forgets clients whose submission window has expired.
pub async fn start_limiter_eviction(limiter: SubmissionLimiter) {
    let mut interval = interval(Duration::from_secs(5 * 60));

    loop {
        interval.tick().await;

        let removed = limiter.evict_idle();
        if removed > 0 {
            tracing::debug!(removed, remaining = limiter.tracked_clients(), "Evicted idle rate limit entries");
        }
    }
}
