//! Sliding-window rate limiter for search initiations.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Admits at most `max_requests` starts within any trailing `window`.
///
/// Start times are recorded on admission. A full window makes
/// [`acquire`](Self::acquire) sleep until the oldest start ages out, then
/// re-check, so waits stack when other callers got in first.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    starts: VecDeque<Instant>,
}

impl SlidingWindowLimiter {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            starts: VecDeque::with_capacity(max_requests),
        }
    }

    /// Records a start at `now` if the window admits it; otherwise returns how
    /// long until the oldest start leaves the window.
    pub fn try_admit(&mut self, now: Instant) -> Result<(), Duration> {
        while self
            .starts
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= self.window)
        {
            self.starts.pop_front();
        }

        if self.starts.len() < self.max_requests {
            self.starts.push_back(now);
            return Ok(());
        }

        let oldest = self.starts.front().copied().unwrap_or(now);
        Err(self.window.saturating_sub(now.saturating_duration_since(oldest)))
    }

    /// Waits until a start is admitted.
    pub async fn acquire(&mut self) {
        loop {
            match self.try_admit(Instant::now()) {
                Ok(()) => return,
                Err(wait) => {
                    tracing::debug!(wait_ms = wait.as_millis() as u64, "search rate limit reached, waiting");
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// Starts recorded inside the current window.
    #[must_use]
    pub fn in_window(&self, now: Instant) -> usize {
        self.starts
            .iter()
            .filter(|start| now.saturating_duration_since(**start) < self.window)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_start_in_window_reports_remaining_wait() {
        let mut limiter = SlidingWindowLimiter::new(5, Duration::from_secs(10));
        let t0 = Instant::now();
        for step in 0..5 {
            assert!(limiter.try_admit(t0 + Duration::from_secs(step)).is_ok());
        }

        let t = t0 + Duration::from_secs(6);
        assert_eq!(limiter.try_admit(t), Err(Duration::from_secs(4)));
        assert_eq!(limiter.in_window(t), 5);

        assert!(limiter.try_admit(t0 + Duration::from_secs(10)).is_ok());
        assert_eq!(limiter.in_window(t0 + Duration::from_secs(10)), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_delays_rather_than_drops() {
        let mut limiter = SlidingWindowLimiter::new(5, Duration::from_secs(10));
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert_eq!(Instant::now(), start);

        limiter.acquire().await;
        assert_eq!(Instant::now() - start, Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn never_more_than_max_in_any_window() {
        let mut limiter = SlidingWindowLimiter::new(5, Duration::from_secs(10));
        let mut admitted = Vec::new();
        for _ in 0..17 {
            limiter.acquire().await;
            admitted.push(Instant::now());
        }
        for (i, start) in admitted.iter().enumerate() {
            let within = admitted[i..]
                .iter()
                .filter(|later| later.duration_since(*start) < Duration::from_secs(10))
                .count();
            assert!(within <= 5, "window starting at #{i} admitted {within}");
        }
    }
}
