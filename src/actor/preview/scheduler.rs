use std::time::{Duration, Instant};

use crate::preview::RebuildReason;

/// Pure trailing debounce: timing only, no session or handle access.
///
/// Every request restarts the quiet period, so a burst of N edits collapses
/// into one rebuild that runs once the burst goes quiet. The reason of the
/// most recent request wins, matching the buffer contents the rebuild will
/// snapshot.
pub(super) struct RebuildScheduler {
    debounce: Duration,
    pub(super) pending: Option<Pending>,
}

pub(super) struct Pending {
    pub(super) reason: RebuildReason,
    pub(super) requested_at: Instant,
}

impl RebuildScheduler {
    pub(super) fn new(debounce_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
            pending: None,
        }
    }

    /// Record a rebuild request, restarting the quiet period.
    pub(super) fn request(&mut self, reason: RebuildReason) {
        self.pending = Some(Pending {
            reason,
            requested_at: Instant::now(),
        });
    }

    /// Drop any pending request (a manual rebuild just ran).
    pub(super) fn clear(&mut self) {
        self.pending = None;
    }

    /// Take the pending rebuild if the quiet period has elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<RebuildReason> {
        if !self.is_ready() {
            return None;
        }
        self.pending.take().map(|p| p.reason)
    }

    pub(super) fn is_ready(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.requested_at.elapsed() >= self.debounce)
    }

    /// Sleep hint until the next possible ready time.
    ///
    /// Effectively forever when idle; the select loop only wakes for
    /// messages then.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(pending) = &self.pending else {
            return Duration::from_secs(86400);
        };
        self.debounce
            .saturating_sub(pending.requested_at.elapsed())
            .max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backdate(scheduler: &mut RebuildScheduler, ms: u64) {
        if let Some(pending) = &mut scheduler.pending {
            pending.requested_at = Instant::now() - Duration::from_millis(ms);
        }
    }

    #[test]
    fn test_idle_scheduler_never_ready() {
        let mut scheduler = RebuildScheduler::new(500);
        assert!(!scheduler.is_ready());
        assert!(scheduler.take_if_ready().is_none());
        assert!(scheduler.sleep_duration() >= Duration::from_secs(3600));
    }

    #[test]
    fn test_not_ready_within_quiet_period() {
        let mut scheduler = RebuildScheduler::new(500);
        scheduler.request(RebuildReason::Edit);
        assert!(!scheduler.is_ready());
        assert!(scheduler.take_if_ready().is_none());
        // The request survives an early poll.
        assert!(scheduler.pending.is_some());
    }

    #[test]
    fn test_ready_exactly_once_after_quiet_period() {
        let mut scheduler = RebuildScheduler::new(500);
        scheduler.request(RebuildReason::Edit);
        backdate(&mut scheduler, 501);

        assert_eq!(scheduler.take_if_ready(), Some(RebuildReason::Edit));
        // Taken: the next poll sees nothing.
        assert!(scheduler.take_if_ready().is_none());
    }

    #[test]
    fn test_burst_collapses_to_last_request() {
        let mut scheduler = RebuildScheduler::new(500);
        scheduler.request(RebuildReason::Edit);
        scheduler.request(RebuildReason::Edit);
        scheduler.request(RebuildReason::File);
        backdate(&mut scheduler, 501);

        assert_eq!(scheduler.take_if_ready(), Some(RebuildReason::File));
        assert!(scheduler.take_if_ready().is_none());
    }

    #[test]
    fn test_new_request_restarts_quiet_period() {
        let mut scheduler = RebuildScheduler::new(500);
        scheduler.request(RebuildReason::Edit);
        backdate(&mut scheduler, 400);
        // 400ms in, another edit lands: the clock restarts.
        scheduler.request(RebuildReason::Edit);
        assert!(!scheduler.is_ready());
        let dur = scheduler.sleep_duration();
        assert!(dur >= Duration::from_millis(490));
        assert!(dur <= Duration::from_millis(500));
    }

    #[test]
    fn test_sleep_duration_counts_down() {
        let mut scheduler = RebuildScheduler::new(500);
        scheduler.request(RebuildReason::Edit);
        backdate(&mut scheduler, 300);
        let dur = scheduler.sleep_duration();
        assert!(dur >= Duration::from_millis(190));
        assert!(dur <= Duration::from_millis(210));
    }

    #[test]
    fn test_clear_discards_pending() {
        let mut scheduler = RebuildScheduler::new(500);
        scheduler.request(RebuildReason::Edit);
        backdate(&mut scheduler, 501);
        scheduler.clear();
        assert!(scheduler.take_if_ready().is_none());
    }

    #[test]
    fn test_zero_debounce_is_immediately_ready() {
        let mut scheduler = RebuildScheduler::new(0);
        scheduler.request(RebuildReason::Edit);
        assert_eq!(scheduler.take_if_ready(), Some(RebuildReason::Edit));
    }
}
