#![forbid(unsafe_code)]

//! Index/scroll reconciliation.
//!
//! [`Reconciler`] owns the authoritative selected index. Two paths can change
//! it, and each must not echo back through the other:
//!
//! - **Scroll → index**: the engine reports that the indicator landed on a
//!   tab ([`ScrollObservation::crossed`]). The reconciler commits it without
//!   asking for a programmatic scroll; the container is already there.
//! - **Index → scroll**: the host selects a tab ([`Reconciler::select`]). The
//!   reconciler commits it and returns a [`ScrollCommand`]. Until the driver
//!   settles that command, scroll-derived candidates are dropped; they are
//!   the tail of a scroll the system started itself.
//!
//! # State Machine
//!
//! ```text
//!            sample                     settled sample
//!   Idle ─────────────▶ UserScrolling ──────────────────▶ Idle
//!    │ ▲                     │
//!    │ │ settle(live ticket) │ select(i != index)
//!    ▼ │                     ▼
//!   ProgrammaticScrolling ◀──┘
//! ```
//!
//! # Invariants
//!
//! 1. `index` is always inside `[0, N-1]`.
//! 2. At most one suppression is active: `suppress_index_sync` only while
//!    programmatically scrolling, `suppress_scroll_sync` only while the user
//!    is scrolling.
//! 3. Both suppressions are cleared whenever the owning operation completes,
//!    whether it succeeded or not.
//! 4. Settling a superseded ticket has no effect.
//! 5. Repeating an observation never commits twice.
//! 6. After a settled sample outside a programmatic scroll, `index` is the
//!    tab the container rests on.
//!
//! # Failure Modes
//!
//! - A programmatic scroll that does not confirm arrival still returns to
//!   `Idle`; [`SettleEffects::resync`] asks the caller to recompute from the
//!   live offset so the index can follow wherever the user left the container.
//! - Out-of-range selections are rejected and leave the index untouched.

use std::fmt;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Identifies one programmatic scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollTicket(u64);

impl ScrollTicket {
    /// Raw ticket number.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScrollTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No interaction in flight.
    #[default]
    Idle,
    /// Samples are arriving from a user gesture or momentum.
    UserScrolling,
    /// A programmatic scroll toward `target` is in flight.
    ProgrammaticScrolling { ticket: ScrollTicket, target: usize },
}

/// Why the authoritative index changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrigin {
    /// The host selected a tab.
    Select,
    /// The indicator landed on a tab during a scroll.
    Scroll,
    /// The scroll crossed the midpoint toward a neighbor while touching.
    Preemptive,
    /// The container came to rest on a tab other than the selected one.
    Settle,
    /// Recomputed from the live offset after an unconfirmed programmatic scroll.
    Resync,
    /// The panel count shrank below the selected index.
    Clamp,
}

/// A committed change of the authoritative index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    pub from: usize,
    pub to: usize,
    pub origin: IndexOrigin,
}

/// Request to scroll the container to `target_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    pub ticket: ScrollTicket,
    pub target_index: usize,
    pub change: IndexChange,
}

/// One engine step, as seen by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollObservation {
    /// Sample in panel units, after snapping.
    pub relative_scroll: f64,
    /// Tab the indicator just landed on, if any.
    pub crossed: Option<usize>,
    /// Whether the sample rests exactly on a tab.
    pub settled: bool,
    /// Whether the user is touching the container.
    pub touching: bool,
}

/// What the reconciler did with an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    /// Committed index change.
    pub commit: Option<IndexChange>,
    /// Candidate dropped because a programmatic scroll owns the index.
    pub dropped: Option<usize>,
}

/// How a programmatic scroll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The driver confirmed arrival at the target offset.
    Arrived,
    /// The driver finished without reaching the target (e.g. interrupted).
    NotArrived,
    /// The driver failed.
    Failed,
}

/// Follow-up work after a live ticket settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleEffects {
    /// Re-enable native scroll snapping.
    pub restore_snapping: bool,
    /// Recompute the index from the live offset.
    pub resync: bool,
}

/// Errors for index requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The requested index is not a panel.
    OutOfRange { index: usize, len: usize },
    /// The container has no panels.
    NoPanels,
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} panels")
            }
            Self::NoPanels => write!(f, "no panels to select"),
        }
    }
}

impl std::error::Error for SelectError {}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Owner of the authoritative selected index.
#[derive(Debug, Clone)]
pub struct Reconciler {
    index: usize,
    panel_count: usize,
    phase: Phase,
    next_ticket: u64,
    preemptive: bool,
}

impl Reconciler {
    /// Create a reconciler selecting `index` among `panel_count` panels.
    pub fn new(index: usize, panel_count: usize) -> Result<Self, SelectError> {
        check_index(index, panel_count)?;
        Ok(Self {
            index,
            panel_count,
            phase: Phase::Idle,
            next_ticket: 1,
            preemptive: false,
        })
    }

    /// Commit candidates at the midpoint while touching (builder pattern).
    #[must_use]
    pub fn with_preemptive(mut self, enabled: bool) -> Self {
        self.preemptive = enabled;
        self
    }

    /// Authoritative selected index.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether preemptive commits are enabled.
    #[inline]
    #[must_use]
    pub fn is_preemptive(&self) -> bool {
        self.preemptive
    }

    /// Toggle preemptive commits.
    pub fn set_preemptive(&mut self, enabled: bool) {
        self.preemptive = enabled;
    }

    /// Scroll samples may not overwrite the index.
    #[inline]
    #[must_use]
    pub fn suppress_index_sync(&self) -> bool {
        matches!(self.phase, Phase::ProgrammaticScrolling { .. })
    }

    /// Index changes may not trigger a programmatic scroll.
    #[inline]
    #[must_use]
    pub fn suppress_scroll_sync(&self) -> bool {
        self.phase == Phase::UserScrolling
    }

    /// Ticket of the in-flight programmatic scroll, if any.
    #[inline]
    #[must_use]
    pub fn live_ticket(&self) -> Option<ScrollTicket> {
        match self.phase {
            Phase::ProgrammaticScrolling { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Select `index` on behalf of the host.
    ///
    /// Returns the scroll to perform, or `None` when `index` is already
    /// selected. A new selection supersedes any in-flight scroll.
    pub fn select(&mut self, index: usize) -> Result<Option<ScrollCommand>, SelectError> {
        check_index(index, self.panel_count)?;
        if index == self.index {
            return Ok(None);
        }

        let change = IndexChange {
            from: self.index,
            to: index,
            origin: IndexOrigin::Select,
        };
        let ticket = ScrollTicket(self.next_ticket);
        self.next_ticket += 1;
        self.index = index;
        self.phase = Phase::ProgrammaticScrolling {
            ticket,
            target: index,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "tabflow.reconcile",
            from = change.from,
            to = change.to,
            ticket = ticket.get(),
            "programmatic scroll requested"
        );

        Ok(Some(ScrollCommand {
            ticket,
            target_index: index,
            change,
        }))
    }

    /// Feed one engine step.
    pub fn observe(&mut self, observation: &ScrollObservation) -> Reaction {
        let mut reaction = Reaction::default();

        match self.phase {
            Phase::ProgrammaticScrolling { .. } => {
                reaction.dropped = observation.crossed.filter(|&tab| tab != self.index);
                return reaction;
            }
            Phase::Idle => self.phase = Phase::UserScrolling,
            Phase::UserScrolling => {}
        }

        let candidate = if self.preemptive && observation.touching {
            self.midpoint_tab(observation.relative_scroll)
                .map(|tab| (tab, IndexOrigin::Preemptive))
        } else {
            observation.crossed.map(|tab| (tab, IndexOrigin::Scroll))
        };

        if let Some((tab, origin)) = candidate
            && tab != self.index
        {
            reaction.commit = Some(self.commit(tab, origin));
        }

        if observation.settled {
            self.phase = Phase::Idle;
            // The container came to rest; the index must name the tab it
            // rests on, whatever the gesture committed on the way.
            if let Some(tab) = self.midpoint_tab(observation.relative_scroll)
                && tab != self.index
            {
                let from = reaction.commit.map_or(self.index, |change| change.from);
                let mut change = self.commit(tab, IndexOrigin::Settle);
                change.from = from;
                reaction.commit = Some(change);
            }
        }
        reaction
    }

    /// Report that the programmatic scroll `ticket` ended.
    ///
    /// Returns `None` for a superseded or unknown ticket.
    pub fn settle(&mut self, ticket: ScrollTicket, settlement: Settlement) -> Option<SettleEffects> {
        if self.live_ticket() != Some(ticket) {
            return None;
        }
        self.phase = Phase::Idle;
        Some(SettleEffects {
            restore_snapping: true,
            resync: settlement != Settlement::Arrived,
        })
    }

    /// Align the index with the tab the indicator rests on after an
    /// unconfirmed programmatic scroll.
    pub fn resync(&mut self, live_tab: usize) -> Option<IndexChange> {
        if self.suppress_index_sync() || live_tab >= self.panel_count || live_tab == self.index {
            return None;
        }
        Some(self.commit(live_tab, IndexOrigin::Resync))
    }

    /// Adopt a new panel count, clamping the index if it no longer exists.
    pub fn set_panel_count(&mut self, panel_count: usize) -> Result<Option<IndexChange>, SelectError> {
        if panel_count == 0 {
            return Err(SelectError::NoPanels);
        }
        self.panel_count = panel_count;
        if let Phase::ProgrammaticScrolling { target, .. } = self.phase
            && target >= panel_count
        {
            self.phase = Phase::Idle;
        }
        if self.index >= panel_count {
            return Ok(Some(self.commit(panel_count - 1, IndexOrigin::Clamp)));
        }
        Ok(None)
    }

    fn midpoint_tab(&self, relative_scroll: f64) -> Option<usize> {
        if !relative_scroll.is_finite() {
            return None;
        }
        let last = (self.panel_count - 1) as f64;
        Some(relative_scroll.round().clamp(0.0, last) as usize)
    }

    fn commit(&mut self, tab: usize, origin: IndexOrigin) -> IndexChange {
        let change = IndexChange {
            from: self.index,
            to: tab,
            origin,
        };
        self.index = tab;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "tabflow.reconcile",
            from = change.from,
            to = change.to,
            origin = ?origin,
            "index committed"
        );

        change
    }
}

fn check_index(index: usize, len: usize) -> Result<(), SelectError> {
    if len == 0 {
        return Err(SelectError::NoPanels);
    }
    if index >= len {
        return Err(SelectError::OutOfRange { index, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(relative_scroll: f64, crossed: Option<usize>) -> ScrollObservation {
        ScrollObservation {
            relative_scroll,
            crossed,
            settled: relative_scroll.fract() == 0.0,
            touching: false,
        }
    }

    fn touching(relative_scroll: f64) -> ScrollObservation {
        ScrollObservation {
            touching: true,
            ..sample(relative_scroll, None)
        }
    }

    #[test]
    fn starts_idle_without_suppression() {
        let r = Reconciler::new(1, 3).unwrap();
        assert_eq!(r.phase(), Phase::Idle);
        assert!(!r.suppress_index_sync());
        assert!(!r.suppress_scroll_sync());
    }

    #[test]
    fn rejects_invalid_construction() {
        assert_eq!(
            Reconciler::new(3, 3).unwrap_err(),
            SelectError::OutOfRange { index: 3, len: 3 }
        );
        assert_eq!(Reconciler::new(0, 0).unwrap_err(), SelectError::NoPanels);
    }

    #[test]
    fn select_issues_exactly_one_scroll() {
        let mut r = Reconciler::new(0, 3).unwrap();
        let cmd = r.select(2).unwrap().expect("scroll command");
        assert_eq!(cmd.target_index, 2);
        assert_eq!(cmd.change.from, 0);
        assert_eq!(cmd.change.origin, IndexOrigin::Select);
        assert_eq!(r.index(), 2);
        assert!(r.suppress_index_sync());
        assert!(!r.suppress_scroll_sync());

        // Re-selecting the same tab does nothing.
        assert_eq!(r.select(2).unwrap(), None);
    }

    #[test]
    fn select_out_of_range_leaves_index() {
        let mut r = Reconciler::new(1, 3).unwrap();
        assert_eq!(
            r.select(5).unwrap_err(),
            SelectError::OutOfRange { index: 5, len: 3 }
        );
        assert_eq!(r.index(), 1);
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn scroll_crossing_commits_without_scroll() {
        let mut r = Reconciler::new(0, 3).unwrap();
        let reaction = r.observe(&sample(0.5, None));
        assert_eq!(reaction, Reaction::default());
        assert!(r.suppress_scroll_sync());

        let reaction = r.observe(&sample(1.0, Some(1)));
        assert_eq!(
            reaction.commit,
            Some(IndexChange {
                from: 0,
                to: 1,
                origin: IndexOrigin::Scroll
            })
        );
        assert_eq!(r.index(), 1);
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn crossing_onto_selected_tab_is_not_a_change() {
        let mut r = Reconciler::new(1, 3).unwrap();
        let reaction = r.observe(&sample(1.0, Some(1)));
        assert_eq!(reaction.commit, None);
    }

    #[test]
    fn programmatic_scroll_drops_candidates() {
        let mut r = Reconciler::new(0, 3).unwrap();
        let cmd = r.select(2).unwrap().unwrap();

        let reaction = r.observe(&sample(1.0, Some(1)));
        assert_eq!(reaction.commit, None);
        assert_eq!(reaction.dropped, Some(1));

        let reaction = r.observe(&sample(2.0, Some(2)));
        assert_eq!(reaction, Reaction::default());
        assert_eq!(r.index(), 2);

        let effects = r.settle(cmd.ticket, Settlement::Arrived).unwrap();
        assert!(effects.restore_snapping);
        assert!(!effects.resync);
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn unconfirmed_scroll_clears_and_requests_resync() {
        for settlement in [Settlement::NotArrived, Settlement::Failed] {
            let mut r = Reconciler::new(0, 3).unwrap();
            let cmd = r.select(2).unwrap().unwrap();
            let effects = r.settle(cmd.ticket, settlement).unwrap();
            assert!(effects.restore_snapping);
            assert!(effects.resync);
            assert!(!r.suppress_index_sync());
            assert_eq!(r.index(), 2);

            let change = r.resync(1).unwrap();
            assert_eq!(change.origin, IndexOrigin::Resync);
            assert_eq!(r.index(), 1);
        }
    }

    #[test]
    fn superseded_ticket_is_ignored() {
        let mut r = Reconciler::new(0, 4).unwrap();
        let first = r.select(2).unwrap().unwrap();
        let second = r.select(3).unwrap().unwrap();
        assert_ne!(first.ticket, second.ticket);

        assert_eq!(r.settle(first.ticket, Settlement::NotArrived), None);
        assert!(r.suppress_index_sync());
        assert!(r.settle(second.ticket, Settlement::Arrived).is_some());
        assert!(!r.suppress_index_sync());
    }

    #[test]
    fn resync_is_blocked_while_scrolling_programmatically() {
        let mut r = Reconciler::new(0, 3).unwrap();
        r.select(2).unwrap();
        assert_eq!(r.resync(1), None);
    }

    #[test]
    fn repeated_observation_commits_once() {
        let mut r = Reconciler::new(0, 3).unwrap();
        assert!(r.observe(&sample(1.0, Some(1))).commit.is_some());
        assert!(r.observe(&sample(1.0, None)).commit.is_none());
        assert!(r.observe(&sample(1.0, None)).commit.is_none());
    }

    #[test]
    fn preemptive_commits_at_midpoint_and_reverts() {
        let mut r = Reconciler::new(0, 3).unwrap().with_preemptive(true);

        assert_eq!(r.observe(&touching(0.4)).commit, None);
        let change = r.observe(&touching(0.6)).commit.unwrap();
        assert_eq!(change.to, 1);
        assert_eq!(change.origin, IndexOrigin::Preemptive);

        // Reversing before release re-commits the original tab.
        let change = r.observe(&touching(0.45)).commit.unwrap();
        assert_eq!(change.to, 0);
        assert_eq!(r.index(), 0);
    }

    #[test]
    fn release_that_falls_back_recommits_resting_tab() {
        let mut r = Reconciler::new(0, 3).unwrap().with_preemptive(true);
        assert_eq!(r.observe(&touching(0.6)).commit.unwrap().to, 1);

        // Released short of the midpoint: the container snaps back to 0.
        assert_eq!(r.observe(&sample(0.3, None)).commit, None);
        let change = r.observe(&sample(0.0, None)).commit.unwrap();
        assert_eq!(
            change,
            IndexChange {
                from: 1,
                to: 0,
                origin: IndexOrigin::Settle
            }
        );
        assert_eq!(r.index(), 0);
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn settled_sample_matching_index_commits_nothing() {
        let mut r = Reconciler::new(2, 3).unwrap();
        assert_eq!(r.observe(&sample(2.0, None)), Reaction::default());
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn preemptive_waits_for_crossing_when_not_touching() {
        let mut r = Reconciler::new(0, 3).unwrap().with_preemptive(true);
        assert_eq!(r.observe(&sample(0.6, None)).commit, None);
        assert_eq!(r.observe(&sample(1.0, Some(1))).commit.unwrap().to, 1);
    }

    #[test]
    fn preemptive_is_suppressed_during_programmatic_scroll() {
        let mut r = Reconciler::new(0, 3).unwrap().with_preemptive(true);
        r.select(2).unwrap();
        assert_eq!(r.observe(&touching(0.6)).commit, None);
        assert_eq!(r.index(), 2);
    }

    #[test]
    fn shrinking_panel_count_clamps_index() {
        let mut r = Reconciler::new(3, 4).unwrap();
        let change = r.set_panel_count(2).unwrap().unwrap();
        assert_eq!(change.to, 1);
        assert_eq!(change.origin, IndexOrigin::Clamp);
        assert_eq!(r.set_panel_count(0).unwrap_err(), SelectError::NoPanels);
    }

    #[test]
    fn ticket_displays_with_hash() {
        let mut r = Reconciler::new(0, 2).unwrap();
        let cmd = r.select(1).unwrap().unwrap();
        assert_eq!(cmd.ticket.to_string(), "#1");
    }
}
