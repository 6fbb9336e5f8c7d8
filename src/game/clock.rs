use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Decides when the next tick is due, given a speed in ticks per second.
///
/// When a tick fires late, the overshoot beyond a whole interval is carried
/// into the next one instead of being discarded, so the long-run tick rate
/// matches the speed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TickClock {
    last: Instant,
}

impl TickClock {
    pub(crate) fn new(now: Instant) -> TickClock {
        TickClock { last: now }
    }

    /// Start counting from `now`, e.g., after the game was paused
    pub(crate) fn restart(&mut self, now: Instant) {
        self.last = now;
    }

    /// Return `true` if a tick is due at `now`, in which case the clock
    /// advances.  At most one tick fires per call.
    pub(crate) fn poll(&mut self, now: Instant, speed: NonZeroU32) -> bool {
        let interval = interval(speed);
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < interval {
            return false;
        }
        let remainder = elapsed.as_nanos() % interval.as_nanos().max(1);
        let remainder = Duration::from_nanos(u64::try_from(remainder).unwrap_or_default());
        self.last = now.checked_sub(remainder).unwrap_or(now);
        true
    }

    /// How long to wait from `now` until the next tick is due
    pub(crate) fn until_due(&self, now: Instant, speed: NonZeroU32) -> Duration {
        (self.last + interval(speed)).saturating_duration_since(now)
    }
}

/// Time between ticks at the given speed
pub(crate) fn interval(speed: NonZeroU32) -> Duration {
    Duration::from_secs(1) / speed.get()
}
