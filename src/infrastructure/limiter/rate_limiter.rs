use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use parking_lot::Mutex;

/// Timestamps of accepted submissions inside the current window.
#[derive(Debug)]
struct SubmissionLog {
    accepted: VecDeque<Instant>,
    last_seen: Instant,
}

impl SubmissionLog {
    fn new(now: Instant) -> Self {
        Self {
            accepted: VecDeque::new(),
            last_seen: now,
        }
    }

    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(oldest) = self.accepted.front() {
            if now.duration_since(*oldest) >= window {
                self.accepted.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Per-client sliding window over public form submissions.
#[derive(Clone)]
pub struct SubmissionLimiter {
    map: Arc<DashMap<String, Arc<Mutex<SubmissionLog>>>>,
    limit: u64,
    window: Duration,
}

impl SubmissionLimiter {
    /// A `limit` of zero disables limiting.
    pub fn new(limit: u64, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            limit,
            window,
        }
    }

    fn log_for(&self, key: &str) -> Arc<Mutex<SubmissionLog>> {
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SubmissionLog::new(Instant::now()))))
            .clone()
    }

    /// Records a submission for `key`. Returns the seconds to wait when the
    /// window is already full.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        if self.limit == 0 {
            return Ok(());
        }

        let log = self.log_for(key);
        let mut log = log.lock();
        log.last_seen = now;
        log.prune(now, self.window);

        if (log.accepted.len() as u64) < self.limit {
            log.accepted.push_back(now);
            return Ok(());
        }

        let retry_after = log
            .accepted
            .front()
            .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
            .unwrap_or(self.window);

        Err(retry_after.as_secs().max(1))
    }

    /// Drops clients idle for longer than one window. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map
            .retain(|_, log| now.duration_since(log.lock().last_seen) < self.window);
        before.saturating_sub(self.map.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}
