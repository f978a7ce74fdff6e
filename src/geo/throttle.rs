use governor::clock::{Clock, DefaultClock};
use governor::{Quota, RateLimiter};
use std::time::Duration;

type DirectLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Process-wide request pacing: at most one request per `min_interval`,
/// no matter how many worker threads share it. The first request goes out
/// immediately. A zero interval disables pacing.
pub struct Throttle {
    limiter: Option<DirectLimiter>,
    clock: DefaultClock,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            limiter: Quota::with_period(min_interval).map(RateLimiter::direct),
            clock: DefaultClock::default(),
        }
    }

    /// Blocks the calling thread until the limiter admits one request.
    /// Returns how long it slept.
    pub fn wait(&self) -> Duration {
        let Some(limiter) = &self.limiter else {
            return Duration::ZERO;
        };

        let mut slept = Duration::ZERO;
        while let Err(not_until) = limiter.check() {
            let pause = not_until
                .wait_time_from(self.clock.now())
                .max(Duration::from_millis(1));
            std::thread::sleep(pause);
            slept += pause;
        }
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn first_request_is_immediate() {
        let throttle = Throttle::new(Duration::from_secs(60));
        assert_eq!(throttle.wait(), Duration::ZERO);
    }

    #[test]
    fn zero_interval_never_waits() {
        let throttle = Throttle::new(Duration::ZERO);
        for _ in 0..5 {
            assert_eq!(throttle.wait(), Duration::ZERO);
        }
    }

    #[test]
    fn consecutive_requests_are_spaced() {
        let interval = Duration::from_millis(40);
        let throttle = Throttle::new(interval);

        let start = Instant::now();
        for _ in 0..3 {
            throttle.wait();
        }

        assert!(start.elapsed() >= interval * 2);
    }

    #[test]
    fn threads_sharing_a_throttle_are_spaced() {
        let interval = Duration::from_millis(100);
        let throttle = Arc::new(Throttle::new(interval));
        let starts = Arc::new(Mutex::new(Vec::new()));

        let workers: Vec<_> = (0..2)
            .map(|_| {
                let throttle = Arc::clone(&throttle);
                let starts = Arc::clone(&starts);
                std::thread::spawn(move || {
                    for _ in 0..3 {
                        throttle.wait();
                        starts.lock().unwrap().push(Instant::now());
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let mut starts = starts.lock().unwrap().clone();
        starts.sort();
        assert_eq!(starts.len(), 6);
        let slack = Duration::from_millis(10);
        for pair in starts.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap + slack >= interval, "requests only {gap:?} apart");
        }
    }
}
