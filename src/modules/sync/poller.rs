use std::fmt;
use std::time::{Duration, Instant};

/// Snapshot of what the user is doing, taken when a refresh is considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    pub player_open: bool,
    pub info_open: bool,
    pub row_menu_open: bool,
    pub dragging: bool,
}

impl Activity {
    pub fn busy_reason(&self) -> Option<SuppressReason> {
        if self.player_open {
            Some(SuppressReason::PlayerOpen)
        } else if self.info_open {
            Some(SuppressReason::InfoOpen)
        } else if self.row_menu_open {
            Some(SuppressReason::RowMenuOpen)
        } else if self.dragging {
            Some(SuppressReason::Dragging)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    PlayerOpen,
    InfoOpen,
    RowMenuOpen,
    Dragging,
    RefreshInFlight,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SuppressReason::PlayerOpen => "player open",
            SuppressReason::InfoOpen => "info open",
            SuppressReason::RowMenuOpen => "row menu open",
            SuppressReason::Dragging => "drag in progress",
            SuppressReason::RefreshInFlight => "refresh in flight",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    Fetch,
    Skip(SuppressReason),
}

/// Periodic playlist refresh that stays out of the user's way.
#[derive(Debug, Clone)]
pub struct PlaylistPoller {
    interval: Duration,
    last_tick: Option<Instant>,
    in_flight: bool,
}

impl PlaylistPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            in_flight: false,
        }
    }

    #[cfg(test)]
    fn in_flight(&self) -> bool {
        self.in_flight
    }

    #[cfg(test)]
    fn is_due(&self, now: Instant) -> bool {
        self.last_tick
            .map(|last| now.duration_since(last) >= self.interval)
            .unwrap_or(true)
    }

    /// Time left until the next tick is due.
    pub fn until_due(&self, now: Instant) -> Duration {
        self.last_tick
            .map(|last| self.interval.saturating_sub(now.duration_since(last)))
            .unwrap_or(Duration::ZERO)
    }

    /// Decide what a tick does. A `Fetch` marks a refresh in flight.
    pub fn on_tick(&mut self, now: Instant, activity: Activity) -> TickDecision {
        self.last_tick = Some(now);

        if self.in_flight {
            return TickDecision::Skip(SuppressReason::RefreshInFlight);
        }
        if let Some(reason) = activity.busy_reason() {
            return TickDecision::Skip(reason);
        }

        self.in_flight = true;
        TickDecision::Fetch
    }

    /// Settle the in-flight refresh. Returns whether its answer may be applied.
    pub fn settle(&mut self, activity: Activity) -> bool {
        self.in_flight = false;
        activity.busy_reason().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Activity = Activity {
        player_open: false,
        info_open: false,
        row_menu_open: false,
        dragging: false,
    };

    // ── scheduling ───────────────────────────────────────────────────────────

    #[test]
    fn first_tick_is_due_immediately_then_waits_an_interval() {
        let mut poller = PlaylistPoller::new(Duration::from_secs(5));
        let start = Instant::now();
        assert!(poller.is_due(start));

        poller.on_tick(start, IDLE);
        assert!(!poller.is_due(start + Duration::from_secs(4)));
        assert!(poller.is_due(start + Duration::from_secs(5)));
        assert_eq!(poller.until_due(start + Duration::from_secs(2)), Duration::from_secs(3));
    }

    // ── suppression ──────────────────────────────────────────────────────────

    #[test]
    fn busy_user_suppresses_the_fetch() {
        let now = Instant::now();
        let cases = [
            (Activity { player_open: true, ..IDLE }, SuppressReason::PlayerOpen),
            (Activity { info_open: true, ..IDLE }, SuppressReason::InfoOpen),
            (Activity { row_menu_open: true, ..IDLE }, SuppressReason::RowMenuOpen),
            (Activity { dragging: true, ..IDLE }, SuppressReason::Dragging),
        ];

        for (activity, reason) in cases {
            let mut poller = PlaylistPoller::new(Duration::from_secs(5));
            assert_eq!(poller.on_tick(now, activity), TickDecision::Skip(reason));
            assert!(!poller.in_flight());
        }
    }

    #[test]
    fn only_one_refresh_in_flight() {
        let mut poller = PlaylistPoller::new(Duration::from_secs(5));
        let now = Instant::now();

        assert_eq!(poller.on_tick(now, IDLE), TickDecision::Fetch);
        assert_eq!(
            poller.on_tick(now + Duration::from_secs(5), IDLE),
            TickDecision::Skip(SuppressReason::RefreshInFlight)
        );

        assert!(poller.settle(IDLE));
        assert_eq!(poller.on_tick(now + Duration::from_secs(10), IDLE), TickDecision::Fetch);
    }

    #[test]
    fn answer_arriving_while_busy_is_dropped() {
        let mut poller = PlaylistPoller::new(Duration::from_secs(5));
        poller.on_tick(Instant::now(), IDLE);

        assert!(!poller.settle(Activity { dragging: true, ..IDLE }));
        assert!(!poller.in_flight());
    }
}
