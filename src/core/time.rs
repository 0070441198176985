/*!
 * Deadlines
 * Absolute time points on the monotonic or the wall clock
 */

use std::time::{Duration, Instant, SystemTime};

/// An absolute point in time a bounded wait gives up at
///
/// Implemented for [`Instant`] (monotonic) and [`SystemTime`] (wall clock).
/// Waits always run against the monotonic clock; wall clock deadlines are
/// resolved once, when the wait starts, so later adjustments of the system
/// clock do not stretch or shorten a wait already in progress.
pub trait Deadline {
    /// Resolve to a monotonic instant, `None` if it cannot be represented
    fn to_instant(&self) -> Option<Instant>;
}

impl Deadline for Instant {
    #[inline]
    fn to_instant(&self) -> Option<Instant> {
        Some(*self)
    }
}

impl Deadline for SystemTime {
    fn to_instant(&self) -> Option<Instant> {
        let now = Instant::now();
        match self.duration_since(SystemTime::now()) {
            Ok(ahead) => now.checked_add(ahead),
            // Already passed
            Err(_) => Some(now),
        }
    }
}

impl<D: Deadline + ?Sized> Deadline for &D {
    #[inline]
    fn to_instant(&self) -> Option<Instant> {
        (**self).to_instant()
    }
}

/// Monotonic deadline for a relative timeout
///
/// `None` when `timeout` is too large to be added to the current instant;
/// callers treat that as an unbounded wait.
#[inline]
pub fn deadline_after(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_is_identity() {
        let at = Instant::now() + Duration::from_millis(5);
        assert_eq!(at.to_instant(), Some(at));
        assert_eq!((&at).to_instant(), Some(at));
    }

    #[test]
    fn test_past_wall_clock_resolves_to_now() {
        let before = Instant::now();
        let past = SystemTime::now() - Duration::from_secs(60);
        let resolved = past.to_instant().unwrap();
        assert!(resolved >= before);
        assert!(resolved <= Instant::now());
    }

    #[test]
    fn test_future_wall_clock_is_ahead() {
        let future = SystemTime::now() + Duration::from_secs(60);
        let resolved = future.to_instant().unwrap();
        let ahead = resolved.saturating_duration_since(Instant::now());
        assert!(ahead > Duration::from_secs(55));
        assert!(ahead <= Duration::from_secs(60));
    }

    #[test]
    fn test_huge_timeout_is_unbounded() {
        assert!(deadline_after(Duration::MAX).is_none());
        assert!(deadline_after(Duration::from_millis(1)).is_some());
    }
}
