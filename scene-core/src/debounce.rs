//! Resize-event coalescing.
//!
//! A burst of resize observations collapses into a single firing once
//! the surface has been quiet for the configured delay. At most one
//! pending deadline exists at any time: every new observation re-arms
//! it, cancelling the previous one, so only the most recent size is
//! ever delivered.

use glam::Vec2;

#[derive(Clone, Copy, Debug)]
struct Pending {
    size: Vec2,
    deadline: f64,
}

/// Debounces surface-size changes against a monotonic clock.
///
/// The clock is supplied by the caller (seconds, any epoch), which keeps
/// the debouncer deterministic under test.
#[derive(Clone, Copy, Debug)]
pub struct ResizeDebouncer {
    delay: f64,
    pending: Option<Pending>,
}

impl ResizeDebouncer {
    pub fn new(delay: f64) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a new surface size at time `now`.
    ///
    /// Replaces any pending observation and restarts the quiet period —
    /// the earlier deadline is cancelled, never fired.
    pub fn observe(&mut self, size: Vec2, now: f64) {
        self.pending = Some(Pending {
            size,
            deadline: now + self.delay,
        });
    }

    /// Returns the settled size once the quiet period has elapsed.
    ///
    /// Fires at most once per burst: the pending observation is consumed.
    pub fn poll(&mut self, now: f64) -> Option<Vec2> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                Some(pending.size)
            }
            _ => None,
        }
    }

    /// True while an observation is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_the_quiet_period() {
        let mut debouncer = ResizeDebouncer::new(0.15);
        debouncer.observe(Vec2::new(800.0, 600.0), 0.0);

        assert_eq!(debouncer.poll(0.1), None);
        assert_eq!(debouncer.poll(0.15), Some(Vec2::new(800.0, 600.0)));
    }

    #[test]
    fn burst_of_observations_fires_once_with_the_last_size() {
        let mut debouncer = ResizeDebouncer::new(0.15);

        // Ten observations inside one another's quiet periods.
        for i in 0..10 {
            let size = Vec2::new(800.0 + i as f32, 600.0);
            debouncer.observe(size, i as f64 * 0.01);
            assert_eq!(debouncer.poll(i as f64 * 0.01), None);
        }

        // Settles 0.15 after the final observation, with its dimensions.
        assert_eq!(debouncer.poll(0.20), None);
        assert_eq!(debouncer.poll(0.24), Some(Vec2::new(809.0, 600.0)));

        // Nothing further fires for the same burst.
        assert_eq!(debouncer.poll(10.0), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn new_observation_cancels_an_unfired_deadline() {
        let mut debouncer = ResizeDebouncer::new(0.15);
        debouncer.observe(Vec2::new(100.0, 100.0), 0.0);
        debouncer.observe(Vec2::new(200.0, 200.0), 0.1);

        // The first deadline (0.15) must not fire.
        assert_eq!(debouncer.poll(0.16), None);
        assert_eq!(debouncer.poll(0.25), Some(Vec2::new(200.0, 200.0)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = ResizeDebouncer::new(0.15);
        assert_eq!(debouncer.poll(100.0), None);
        assert!(!debouncer.is_pending());
    }
}
