#![forbid(unsafe_code)]

//! Tick-driven programmatic scrolling.
//!
//! [`ScrollAnimation`] sizes a scroll from its distance. [`ScrollTween`]
//! eases one offset toward another as time is fed in, and [`TweenDriver`]
//! wraps it as a [`ScrollDriver`] for hosts without a native smooth scroll
//! (and for tests).
//!
//! # Invariants
//!
//! 1. A tween that finishes reports its exact target offset.
//! 2. Every request settles exactly once: `Ok(true)` on arrival, `Ok(false)`
//!    when superseded, jumped over or interrupted, `Err` when failed.
//! 3. At most one tween is in flight.

use tabflow_core::{EasingKind, ScrollTicket};
use web_time::Duration;

use crate::driver::{ScrollDriver, ScrollDriverError, ScrollRequest, ScrollSettlement};

// ---------------------------------------------------------------------------
// ScrollAnimation
// ---------------------------------------------------------------------------

/// Duration and easing of a programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub min_duration: Duration,
    pub max_duration: Duration,
    /// Milliseconds of animation per 1000px travelled.
    pub speed_ms_per_1000px: f64,
    pub easing: EasingKind,
}

impl Default for ScrollAnimation {
    fn default() -> Self {
        Self {
            min_duration: Duration::from_millis(500),
            max_duration: Duration::from_millis(1000),
            speed_ms_per_1000px: 500.0,
            easing: EasingKind::EaseInOutCubic,
        }
    }
}

impl ScrollAnimation {
    /// Animation length for a scroll of `distance` pixels, clamped to
    /// `[min_duration, max_duration]`.
    #[must_use]
    pub fn duration_for(&self, distance: f64) -> Duration {
        let ms = distance.abs() / 1000.0 * self.speed_ms_per_1000px;
        let raw = if ms.is_infinite() {
            self.max_duration
        } else if ms > 0.0 {
            Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(self.max_duration)
        } else {
            Duration::ZERO
        };
        raw.min(self.max_duration).max(self.min_duration)
    }
}

// ---------------------------------------------------------------------------
// ScrollTween
// ---------------------------------------------------------------------------

/// One eased scroll from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTween {
    ticket: ScrollTicket,
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: EasingKind,
}

impl ScrollTween {
    /// Tween for `request`, starting at `from`.
    #[must_use]
    pub fn new(from: f64, request: &ScrollRequest) -> Self {
        let to = request.target_offset;
        Self {
            ticket: request.ticket,
            from,
            to,
            duration: request.animation.duration_for(to - from),
            elapsed: Duration::ZERO,
            easing: request.animation.easing,
        }
    }

    #[inline]
    #[must_use]
    pub fn ticket(&self) -> ScrollTicket {
        self.ticket
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear time progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current eased offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let t = (self.easing.function())(self.progress());
        self.from + (self.to - self.from) * t
    }

    /// Advance by `dt` and return the new offset.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.offset()
    }
}

// ---------------------------------------------------------------------------
// TweenDriver
// ---------------------------------------------------------------------------

/// [`ScrollDriver`] that animates a virtual offset as the host ticks it.
///
/// Settlements queue up until [`drain_settled`](Self::drain_settled).
#[derive(Debug, Clone)]
pub struct TweenDriver {
    offset: f64,
    snapping: bool,
    active: Option<ScrollTween>,
    settled: Vec<(ScrollTicket, ScrollSettlement)>,
    requests: Vec<ScrollRequest>,
}

impl Default for TweenDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenDriver {
    /// Driver resting at offset 0 with snapping enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            snapping: true,
            active: None,
            settled: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Current virtual offset, in pixels.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.snapping
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Tween in flight, if any.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<&ScrollTween> {
        self.active.as_ref()
    }

    /// Requests received since the last [`take_requests`](Self::take_requests),
    /// oldest first.
    #[inline]
    #[must_use]
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Drain the request log. Long-lived hosts call this once per frame so
    /// the log stays bounded.
    pub fn take_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Advance the tween in flight.
    ///
    /// Returns the new offset, or `None` when idle. A tween that finishes
    /// settles `Ok(true)`.
    pub fn tick(&mut self, dt: Duration) -> Option<f64> {
        let tween = self.active.as_mut()?;
        self.offset = tween.tick(dt);
        if tween.is_finished() {
            let ticket = tween.ticket();
            self.active = None;
            self.settled.push((ticket, Ok(true)));
        }
        Some(self.offset)
    }

    /// Stop the tween in flight where it is (e.g. the user grabbed the
    /// container). It settles `Ok(false)`.
    pub fn interrupt(&mut self) {
        self.finish_active(Ok(false));
    }

    /// Abort the tween in flight with `error`.
    pub fn fail(&mut self, error: ScrollDriverError) {
        self.finish_active(Err(error));
    }

    /// Take every queued settlement, oldest first.
    pub fn drain_settled(&mut self) -> Vec<(ScrollTicket, ScrollSettlement)> {
        std::mem::take(&mut self.settled)
    }

    fn finish_active(&mut self, result: ScrollSettlement) {
        if let Some(tween) = self.active.take() {
            tracing::trace!(
                target: "tabflow.tween",
                ticket = tween.ticket().get(),
                offset = self.offset,
                arrived = matches!(result, Ok(true)),
                "tween finished early"
            );
            self.settled.push((tween.ticket(), result));
        }
    }
}

impl ScrollDriver for TweenDriver {
    fn scroll_to(&mut self, request: ScrollRequest) {
        self.finish_active(Ok(false));
        self.active = Some(ScrollTween::new(self.offset, &request));
        self.requests.push(request);
    }

    fn jump_to(&mut self, offset: f64) {
        self.finish_active(Ok(false));
        self.offset = offset;
    }

    fn set_snapping(&mut self, enabled: bool) {
        self.snapping = enabled;
    }
}
