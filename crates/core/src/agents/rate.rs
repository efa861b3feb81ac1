//! Crew-wide rate gate for outbound LLM calls.
//!
//! One gate is shared by all four agents so the whole crew stays under a
//! single requests-per-minute cap. Only the live LLM path acquires the
//! gate; fallback generation never waits.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct RateGate {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Gate allowing `rpm` calls per minute. `rpm == 0` disables the gate.
    pub fn per_minute(rpm: u32) -> Self {
        let min_interval = if rpm == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(60.0 / rpm as f64)
        };
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until the next call slot is available.
    ///
    /// Waiters queue on the internal lock, so concurrent calls are spaced
    /// `min_interval` apart in arrival order.
    pub async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last.lock().await;
        let now = Instant::now();
        let slot = match *last {
            Some(prev) => {
                let ready = prev + self.min_interval;
                if ready > now {
                    tokio::time::sleep_until(ready).await;
                }
                ready.max(now)
            }
            None => now,
        };
        *last = Some(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_is_immediate() {
        let gate = RateGate::per_minute(60);
        let before = Instant::now();
        gate.acquire().await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_are_spaced() {
        let gate = RateGate::per_minute(60); // one per second
        let start = Instant::now();
        gate.acquire().await;
        gate.acquire().await;
        gate.acquire().await;
        assert!(Instant::now() - start >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_gate_never_waits() {
        let gate = RateGate::per_minute(0);
        let before = Instant::now();
        for _ in 0..100 {
            gate.acquire().await;
        }
        assert_eq!(Instant::now(), before);
    }
}
