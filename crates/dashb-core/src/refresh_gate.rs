//! Refresh cycle state machine.
//!
//! Tracks whether a refresh is in flight and decides, according to the
//! configured [`OverlapPolicy`], whether a new trigger may start another one.
//! Used by `DashboardState` behind a mutex.

use crate::config::OverlapPolicy;

/// Externally visible phase of the refresh pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    #[default]
    Idle,
    Refreshing,
}

#[derive(Debug, Clone, Default)]
pub struct RefreshGate {
    policy: OverlapPolicy,
    in_flight: usize,
}

impl RefreshGate {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            in_flight: 0,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn phase(&self) -> RefreshPhase {
        if self.in_flight == 0 {
            RefreshPhase::Idle
        } else {
            RefreshPhase::Refreshing
        }
    }

    /// Number of refresh cycles that have begun but not finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True if a new refresh can be started.
    pub fn can_start_refresh(&self) -> bool {
        match self.policy {
            OverlapPolicy::Coalesce => self.in_flight == 0,
            OverlapPolicy::AllowOverlap => true,
        }
    }

    /// Record the start of a refresh. Returns false (and records nothing) when
    /// the trigger is coalesced into the refresh already running.
    pub fn try_begin(&mut self) -> bool {
        if !self.can_start_refresh() {
            return false;
        }
        self.in_flight += 1;
        true
    }

    /// Record a settled refresh. Returns true when no refresh remains in
    /// flight, i.e. the pipeline is back to `Idle`.
    pub fn finish(&mut self) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.in_flight == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_allows_refresh() {
        let gate = RefreshGate::new(OverlapPolicy::Coalesce);
        assert_eq!(gate.phase(), RefreshPhase::Idle);
        assert!(gate.can_start_refresh());
    }

    #[test]
    fn coalesce_blocks_second_trigger() {
        let mut gate = RefreshGate::new(OverlapPolicy::Coalesce);
        assert!(gate.try_begin());
        assert_eq!(gate.phase(), RefreshPhase::Refreshing);
        assert!(!gate.try_begin());
        assert_eq!(gate.in_flight(), 1);

        assert!(gate.finish());
        assert_eq!(gate.phase(), RefreshPhase::Idle);
        assert!(gate.try_begin());
    }

    #[test]
    fn allow_overlap_stays_refreshing_until_last_finishes() {
        let mut gate = RefreshGate::new(OverlapPolicy::AllowOverlap);
        assert!(gate.try_begin());
        assert!(gate.try_begin());
        assert_eq!(gate.in_flight(), 2);

        assert!(!gate.finish());
        assert_eq!(gate.phase(), RefreshPhase::Refreshing);
        assert!(gate.finish());
        assert_eq!(gate.phase(), RefreshPhase::Idle);
    }

    #[test]
    fn finish_without_begin_is_harmless() {
        let mut gate = RefreshGate::default();
        assert!(gate.finish());
        assert_eq!(gate.in_flight(), 0);
    }
}
