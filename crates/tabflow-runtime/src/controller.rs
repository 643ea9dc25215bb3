#![forbid(unsafe_code)]

//! Indicator controller.
//!
//! [`IndicatorController`] owns everything that survives between host
//! events: the measured strip, the engine's tracking state, the reconciler
//! and the last rendered frame. The host feeds it events; the controller
//! answers through the [`ScrollDriver`] and the frame sink.
//!
//! ```text
//!   on_scroll ──▶ TransformEngine ──▶ Reconciler ──▶ IndexChange
//!                      │
//!                      └──▶ IndicatorFrame ──▶ sink
//!
//!   select ──▶ Reconciler ──▶ ScrollDriver::scroll_to
//!                                   │
//!   scroll_settled ◀────────────────┘ (host reports the ticket back)
//! ```
//!
//! # Failure Modes
//!
//! - Unmeasured geometry defers the sample; the strip is measured again on
//!   the next sample or resize. A late first measurement jumps to the
//!   selected tab instead of stepping the sample that found it.
//! - A scroll that stops short or fails still restores snapping, then the
//!   index follows the live offset.

use tabflow_core::{
    IndexChange, Phase, PanelStrip, Reconciler, ScrollObservation, ScrollTicket, SelectError,
    TrackingState, Transform, TransformEngine,
};
use web_time::Duration;

use crate::config::IndicatorConfig;
use crate::driver::{
    GeometryProvider, NoTouch, ScrollDriver, ScrollRequest, ScrollSettlement, TouchSignal,
    measure_strip, settlement_of,
};
use crate::tween::{ScrollAnimation, TweenDriver};

/// Everything the host needs to paint the indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorFrame {
    pub transform: Transform,
    /// Width of the indicator element before `scale_x`, in pixels.
    pub width: f64,
}

type FrameSink = Box<dyn FnMut(IndicatorFrame)>;

/// Keeps a sliding tab indicator in sync with a paged scroll container.
pub struct IndicatorController<G, D, T = NoTouch> {
    geometry: G,
    driver: D,
    touch: T,
    engine: TransformEngine,
    animation: ScrollAnimation,
    reconciler: Reconciler,
    strip: Option<PanelStrip>,
    tracking: TrackingState,
    transform: Transform,
    indicator_width: f64,
    last_offset: f64,
    running: bool,
    sink: Option<FrameSink>,
}

impl<G, D, T> std::fmt::Debug for IndicatorController<G, D, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorController")
            .field("index", &self.reconciler.index())
            .field("phase", &self.reconciler.phase())
            .field("tracking", &self.tracking)
            .field("transform", &self.transform)
            .field("indicator_width", &self.indicator_width)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<G: GeometryProvider, D: ScrollDriver> IndicatorController<G, D> {
    /// Create a stopped controller selecting `initial_index`.
    pub fn new(
        geometry: G,
        driver: D,
        initial_index: usize,
        config: &IndicatorConfig,
    ) -> Result<Self, SelectError> {
        let reconciler = Reconciler::new(initial_index, geometry.panel_count())?
            .with_preemptive(config.preemptive);
        Ok(Self {
            geometry,
            driver,
            touch: NoTouch,
            engine: config.engine(),
            animation: config.scroll_animation(),
            reconciler,
            strip: None,
            tracking: TrackingState::anchored(initial_index),
            transform: Transform::IDENTITY,
            indicator_width: 0.0,
            last_offset: 0.0,
            running: false,
            sink: None,
        })
    }
}

impl<G: GeometryProvider, D: ScrollDriver, T: TouchSignal> IndicatorController<G, D, T> {
    /// Use `touch` to detect active touches (builder pattern).
    #[must_use]
    pub fn with_touch<U: TouchSignal>(self, touch: U) -> IndicatorController<G, D, U> {
        IndicatorController {
            geometry: self.geometry,
            driver: self.driver,
            touch,
            engine: self.engine,
            animation: self.animation,
            reconciler: self.reconciler,
            strip: self.strip,
            tracking: self.tracking,
            transform: self.transform,
            indicator_width: self.indicator_width,
            last_offset: self.last_offset,
            running: self.running,
            sink: self.sink,
        }
    }

    /// Receive a frame whenever the indicator changes (builder pattern).
    #[must_use]
    pub fn with_sink(mut self, sink: impl FnMut(IndicatorFrame) + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start listening: measure, jump to the selected panel, paint at rest.
    ///
    /// A measurement error is returned but not fatal; the controller keeps
    /// running and measures again on the next sample or resize.
    pub fn start(&mut self) -> Result<(), tabflow_core::GeometryError> {
        self.running = true;
        match measure_strip(&self.geometry) {
            Ok(strip) => {
                self.strip = Some(strip);
                self.realign(true);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    target: "tabflow.controller",
                    error = %err,
                    "start deferred: geometry unavailable"
                );
                self.strip = None;
                Err(err)
            }
        }
    }

    /// Stop listening. Samples are ignored until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    // -----------------------------------------------------------------------
    // Host events
    // -----------------------------------------------------------------------

    /// Feed one raw scroll offset, in pixels.
    pub fn on_scroll(&mut self, raw_offset: f64) -> Option<IndexChange> {
        if !self.running {
            return None;
        }
        if raw_offset.is_finite() {
            self.last_offset = raw_offset;
        }
        if self.strip.is_none() {
            match measure_strip(&self.geometry) {
                Ok(strip) => {
                    // First measurement: the sample was taken against a layout
                    // nobody anchored, so land on the selected tab like start.
                    self.strip = Some(strip);
                    tracing::debug!(
                        target: "tabflow.controller",
                        raw_offset,
                        index = self.reconciler.index(),
                        "late measurement: realigned on selected tab"
                    );
                    self.realign(true);
                    return None;
                }
                Err(err) => {
                    tracing::debug!(
                        target: "tabflow.controller",
                        raw_offset,
                        error = %err,
                        "sample deferred: geometry unavailable"
                    );
                    return None;
                }
            }
        }
        let strip = self.strip.as_ref()?;

        let step = self
            .engine
            .step(&self.tracking, strip.relative_scroll(raw_offset), strip);
        self.tracking = step.tracking;
        self.transform = step.transform;
        if let Some(tab) = step.crossed {
            self.indicator_width = strip.width(tab);
        }

        let reaction = self.reconciler.observe(&ScrollObservation {
            relative_scroll: step.relative_scroll,
            crossed: step.crossed,
            settled: step.is_settled(),
            touching: self.touch.is_touching(),
        });
        if let Some(tab) = reaction.dropped {
            tracing::debug!(
                target: "tabflow.controller",
                tab,
                index = self.reconciler.index(),
                "candidate dropped during programmatic scroll"
            );
        }
        if let Some(change) = reaction.commit {
            tracing::debug!(
                target: "tabflow.controller",
                from = change.from,
                to = change.to,
                origin = ?change.origin,
                "index committed"
            );
        }

        self.emit();
        reaction.commit
    }

    /// Select a tab on behalf of the host and scroll to it.
    ///
    /// Returns the committed change, or `None` when `index` is already
    /// selected.
    pub fn select(&mut self, index: usize) -> Result<Option<IndexChange>, SelectError> {
        let Some(command) = self.reconciler.select(index)? else {
            return Ok(None);
        };

        if self.strip.is_none() {
            self.strip = measure_strip(&self.geometry).ok();
        }
        let Some(strip) = self.strip.as_ref() else {
            // Nothing to scroll yet; the next start, resize or sample lands on `index`.
            tracing::debug!(
                target: "tabflow.controller",
                index,
                "scroll deferred: geometry unavailable"
            );
            self.reconciler
                .settle(command.ticket, tabflow_core::Settlement::NotArrived);
            return Ok(Some(command.change));
        };

        let request = ScrollRequest {
            ticket: command.ticket,
            target_offset: strip.scroll_offset_of(index),
            animation: self.animation,
        };
        tracing::debug!(
            target: "tabflow.controller",
            ticket = command.ticket.get(),
            from = command.change.from,
            to = index,
            target_offset = request.target_offset,
            "scroll issued"
        );
        self.driver.set_snapping(false);
        self.driver.scroll_to(request);
        Ok(Some(command.change))
    }

    /// Report how the programmatic scroll `ticket` ended.
    ///
    /// Returns an index change when the scroll stopped short and the index
    /// follows the live offset.
    pub fn scroll_settled(
        &mut self,
        ticket: ScrollTicket,
        result: ScrollSettlement,
    ) -> Option<IndexChange> {
        let target = match self.reconciler.phase() {
            Phase::ProgrammaticScrolling { ticket: live, target } if live == ticket => target,
            _ => {
                tracing::debug!(
                    target: "tabflow.controller",
                    ticket = ticket.get(),
                    "stale settlement ignored"
                );
                return None;
            }
        };

        let effects = self.reconciler.settle(ticket, settlement_of(&result))?;
        if effects.restore_snapping {
            self.driver.set_snapping(true);
        }
        match &result {
            Ok(arrived) => tracing::debug!(
                target: "tabflow.controller",
                ticket = ticket.get(),
                arrived,
                "scroll settled"
            ),
            Err(err) => tracing::warn!(
                target: "tabflow.controller",
                ticket = ticket.get(),
                error = %err,
                "scroll failed"
            ),
        }

        if !effects.resync {
            if self.tracking.current_tab != target {
                self.realign(false);
            }
            return None;
        }

        let strip = self.strip.as_ref()?;
        let live_tab = strip.clamp_tab(strip.relative_scroll(self.last_offset).round());
        let change = self.reconciler.resync(live_tab);
        if let Some(change) = change {
            tracing::debug!(
                target: "tabflow.controller",
                from = change.from,
                to = change.to,
                "index resynced from live offset"
            );
        }
        change
    }

    /// The container or a tab changed size: measure again and realign.
    pub fn on_resize(&mut self) -> Option<IndexChange> {
        let was_scrolling = self.reconciler.live_ticket().is_some();
        let clamped = match self.reconciler.set_panel_count(self.geometry.panel_count()) {
            Ok(change) => change,
            Err(err) => {
                tracing::warn!(
                    target: "tabflow.controller",
                    error = %err,
                    "resize ignored: no panels"
                );
                self.strip = None;
                return None;
            }
        };
        if was_scrolling && self.reconciler.live_ticket().is_none() {
            // The scroll target no longer exists.
            self.driver.set_snapping(true);
        }

        match measure_strip(&self.geometry) {
            Ok(strip) => {
                self.strip = Some(strip);
                self.realign(true);
            }
            Err(err) => {
                tracing::debug!(
                    target: "tabflow.controller",
                    error = %err,
                    "resize deferred: geometry unavailable"
                );
                self.strip = None;
            }
        }
        clamped
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Authoritative selected index.
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.reconciler.index()
    }

    #[inline]
    #[must_use]
    pub fn indicator_transform(&self) -> Transform {
        self.transform
    }

    /// Width of the indicator element, in pixels.
    #[inline]
    #[must_use]
    pub fn indicator_width(&self) -> f64 {
        self.indicator_width
    }

    #[inline]
    #[must_use]
    pub fn frame(&self) -> IndicatorFrame {
        IndicatorFrame {
            transform: self.transform,
            width: self.indicator_width,
        }
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.reconciler.phase()
    }

    #[inline]
    #[must_use]
    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    /// Strip measured for the current container width, if any.
    #[inline]
    #[must_use]
    pub fn strip(&self) -> Option<&PanelStrip> {
        self.strip.as_ref()
    }

    /// Toggle preemptive index commits.
    pub fn set_preemptive(&mut self, enabled: bool) {
        self.reconciler.set_preemptive(enabled);
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable geometry; call [`on_resize`](Self::on_resize) after changing it.
    #[inline]
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    #[inline]
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Rest the indicator on the selected tab, optionally jumping the
    /// container there too.
    fn realign(&mut self, jump: bool) {
        let Some(strip) = self.strip.as_ref() else {
            return;
        };
        let index = self.reconciler.index();
        self.tracking = TrackingState::anchored(index);
        self.transform = Transform::resting_at(strip.offset(index));
        self.indicator_width = strip.width(index);
        if jump {
            let offset = strip.scroll_offset_of(index);
            self.last_offset = offset;
            self.driver.jump_to(offset);
        }
        self.emit();
    }

    fn emit(&mut self) {
        let frame = self.frame();
        if let Some(sink) = self.sink.as_mut() {
            sink(frame);
        }
    }
}

impl<G: GeometryProvider, T: TouchSignal> IndicatorController<G, TweenDriver, T> {
    /// Advance the built-in [`TweenDriver`] by `dt`, feeding the resulting
    /// sample and any settlements back through the controller.
    pub fn pump(&mut self, dt: Duration) -> Vec<IndexChange> {
        let mut changes = Vec::new();
        if let Some(offset) = self.driver.tick(dt) {
            changes.extend(self.on_scroll(offset));
        }
        for (ticket, result) in self.driver.drain_settled() {
            changes.extend(self.scroll_settled(ticket, result));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ScrollDriverError, StaticGeometry};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tabflow_core::IndexOrigin;

    fn controller(index: usize) -> IndicatorController<StaticGeometry, TweenDriver> {
        let geometry = StaticGeometry::contiguous(&[100.0, 150.0, 100.0], 100.0);
        let mut c =
            IndicatorController::new(geometry, TweenDriver::new(), index, &IndicatorConfig::default())
                .unwrap();
        c.start().unwrap();
        c
    }

    fn settle_all(c: &mut IndicatorController<StaticGeometry, TweenDriver>) -> Vec<IndexChange> {
        let mut changes = Vec::new();
        for _ in 0..200 {
            changes.extend(c.pump(Duration::from_millis(16)));
            if !c.driver().is_animating() {
                break;
            }
        }
        changes
    }

    #[test]
    fn start_jumps_to_selected_tab_and_paints() {
        let c = controller(2);
        assert_eq!(c.driver().offset(), 200.0);
        assert_eq!(c.indicator_transform(), Transform::resting_at(250.0));
        assert_eq!(c.indicator_width(), 100.0);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn rejects_out_of_range_initial_index() {
        let geometry = StaticGeometry::contiguous(&[100.0], 100.0);
        let err = IndicatorController::new(geometry, TweenDriver::new(), 1, &IndicatorConfig::default())
            .unwrap_err();
        assert_eq!(err, SelectError::OutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn worked_example_half_way() {
        let mut c = controller(0);
        assert_eq!(c.on_scroll(50.0), None);
        let t = c.indicator_transform();
        assert!((t.translate_x - 50.0).abs() < 1e-9);
        assert!((t.scale_x - 1.25).abs() < 1e-9);
        assert_eq!(c.phase(), Phase::UserScrolling);
    }

    #[test]
    fn swipe_commits_on_landing() {
        let mut c = controller(0);
        c.on_scroll(40.0);
        c.on_scroll(80.0);
        let change = c.on_scroll(100.0).unwrap();
        assert_eq!(change.to, 1);
        assert_eq!(change.origin, IndexOrigin::Scroll);
        assert_eq!(c.indicator_width(), 150.0);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.driver().requests().is_empty());
    }

    #[test]
    fn stopped_controller_ignores_samples() {
        let mut c = controller(0);
        c.stop();
        assert_eq!(c.on_scroll(100.0), None);
        assert_eq!(c.tracking(), TrackingState::anchored(0));
    }

    #[test]
    fn select_scrolls_once_without_echo() {
        let mut c = controller(0);
        let change = c.select(2).unwrap().unwrap();
        assert_eq!(change.origin, IndexOrigin::Select);
        assert!(!c.driver().is_snapping());
        assert_eq!(c.driver().requests().len(), 1);
        assert_eq!(c.driver().requests()[0].target_offset, 200.0);

        assert!(settle_all(&mut c).is_empty());
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.indicator_width(), 100.0);
        assert!(c.driver().is_snapping());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.driver().requests().len(), 1);
    }

    #[test]
    fn reselect_is_a_no_op() {
        let mut c = controller(1);
        assert_eq!(c.select(1).unwrap(), None);
        assert!(c.driver().requests().is_empty());
    }

    #[test]
    fn interrupted_scroll_resyncs_to_live_offset() {
        let mut c = controller(0);
        c.select(2).unwrap();
        c.pump(Duration::from_millis(250));
        let held = c.driver().offset();
        assert!((held - 100.0).abs() < 1e-9, "held at {held}");

        c.driver_mut().interrupt();
        let changes = c.pump(Duration::ZERO);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].origin, IndexOrigin::Resync);
        assert_eq!(changes[0].to, 1);
        assert_eq!(c.current_index(), 1);
        assert!(c.driver().is_snapping());
    }

    #[test]
    fn failed_scroll_restores_snapping() {
        let mut c = controller(0);
        c.select(1).unwrap();
        c.driver_mut().fail(ScrollDriverError::Detached);
        let changes = c.pump(Duration::ZERO);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to, 0);
        assert!(c.driver().is_snapping());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn superseding_select_ignores_old_ticket() {
        let mut c = controller(0);
        c.select(1).unwrap();
        c.pump(Duration::from_millis(100));
        c.select(2).unwrap();
        // The superseded ticket settles first and must not resync.
        let changes = c.pump(Duration::ZERO);
        assert!(changes.is_empty());
        assert!(!c.driver().is_snapping());
        assert!(settle_all(&mut c).is_empty());
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn unmeasured_geometry_defers_samples() {
        let geometry = StaticGeometry::unmeasured(&[100.0, 150.0]);
        let mut c =
            IndicatorController::new(geometry, TweenDriver::new(), 0, &IndicatorConfig::default())
                .unwrap();
        assert!(c.start().is_err());
        assert!(c.is_running());
        assert_eq!(c.on_scroll(50.0), None);
        assert!(c.strip().is_none());

        c.geometry_mut().set_container_width(Some(100.0));
        c.on_scroll(50.0);
        assert!(c.strip().is_some());
    }

    #[test]
    fn late_measurement_lands_on_selected_tab() {
        let geometry = StaticGeometry::unmeasured(&[100.0, 150.0, 100.0]);
        let mut c =
            IndicatorController::new(geometry, TweenDriver::new(), 2, &IndicatorConfig::default())
                .unwrap();
        assert!(c.start().is_err());

        // The host still sits at offset 0 when the layout finally measures.
        c.geometry_mut().set_container_width(Some(100.0));
        assert_eq!(c.on_scroll(0.0), None);
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.driver().offset(), 200.0);
        assert_eq!(c.indicator_width(), 100.0);
        assert_eq!(c.indicator_transform(), Transform::resting_at(250.0));
        assert_eq!(c.tracking(), TrackingState::anchored(2));

        assert_eq!(c.on_scroll(200.0), None);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn deferred_select_lands_on_next_sample() {
        let geometry = StaticGeometry::unmeasured(&[100.0, 150.0, 100.0]);
        let mut c =
            IndicatorController::new(geometry, TweenDriver::new(), 0, &IndicatorConfig::default())
                .unwrap();
        assert!(c.start().is_err());
        assert_eq!(c.select(1).unwrap().unwrap().to, 1);
        assert!(c.driver().requests().is_empty());
        assert_eq!(c.phase(), Phase::Idle);

        c.geometry_mut().set_container_width(Some(100.0));
        assert_eq!(c.on_scroll(0.0), None);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.driver().offset(), 100.0);
        assert_eq!(c.indicator_width(), 150.0);
    }

    #[test]
    fn resize_reanchors_without_animation() {
        let mut c = controller(1);
        c.geometry_mut().set_container_width(Some(300.0));
        c.geometry_mut().set_widths(&[90.0, 120.0, 90.0]);
        assert_eq!(c.on_resize(), None);
        assert_eq!(c.driver().offset(), 300.0);
        assert_eq!(c.indicator_width(), 120.0);
        assert_eq!(c.indicator_transform(), Transform::resting_at(90.0));
        assert!(c.driver().requests().is_empty());
    }

    #[test]
    fn resize_clamps_index_when_tabs_disappear() {
        let mut c = controller(2);
        c.geometry_mut().set_widths(&[100.0, 150.0]);
        let change = c.on_resize().unwrap();
        assert_eq!(change.to, 1);
        assert_eq!(change.origin, IndexOrigin::Clamp);
        assert_eq!(c.driver().offset(), 100.0);
    }

    #[test]
    fn resize_dropping_scroll_target_restores_snapping() {
        let mut c = controller(0);
        c.select(2).unwrap();
        assert!(!c.driver().is_snapping());
        c.geometry_mut().set_widths(&[100.0, 150.0]);
        c.on_resize();
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.driver().is_snapping());
        // The cut-short tween settles as stale.
        assert!(c.pump(Duration::ZERO).is_empty());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn preemptive_commits_while_touching() {
        let touching = Rc::new(std::cell::Cell::new(true));
        let flag = Rc::clone(&touching);
        let config = IndicatorConfig {
            preemptive: true,
            ..IndicatorConfig::default()
        };
        let geometry = StaticGeometry::contiguous(&[100.0, 150.0, 100.0], 100.0);
        let mut c = IndicatorController::new(geometry, TweenDriver::new(), 0, &config)
            .unwrap()
            .with_touch(move || flag.get());
        c.start().unwrap();

        assert_eq!(c.on_scroll(40.0), None);
        let change = c.on_scroll(60.0).unwrap();
        assert_eq!(change.origin, IndexOrigin::Preemptive);
        assert_eq!(c.current_index(), 1);

        touching.set(false);
        assert_eq!(c.on_scroll(100.0), None);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn released_short_of_midpoint_settles_back() {
        let touching = Rc::new(std::cell::Cell::new(true));
        let flag = Rc::clone(&touching);
        let config = IndicatorConfig {
            preemptive: true,
            ..IndicatorConfig::default()
        };
        let geometry = StaticGeometry::contiguous(&[100.0, 150.0, 100.0], 100.0);
        let mut c = IndicatorController::new(geometry, TweenDriver::new(), 0, &config)
            .unwrap()
            .with_touch(move || flag.get());
        c.start().unwrap();

        c.on_scroll(40.0);
        assert_eq!(c.on_scroll(60.0).unwrap().to, 1);

        // The finger lifts and the container snaps back to the first panel.
        touching.set(false);
        assert_eq!(c.on_scroll(30.0), None);
        let change = c.on_scroll(0.0).unwrap();
        assert_eq!(change.from, 1);
        assert_eq!(change.to, 0);
        assert_eq!(change.origin, IndexOrigin::Settle);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.indicator_width(), 100.0);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn sink_receives_one_frame_per_sample() {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let geometry = StaticGeometry::contiguous(&[100.0, 150.0, 100.0], 100.0);
        let mut c =
            IndicatorController::new(geometry, TweenDriver::new(), 0, &IndicatorConfig::default())
                .unwrap()
                .with_sink(move |frame| sink.borrow_mut().push(frame));
        c.start().unwrap();
        c.on_scroll(50.0);
        c.on_scroll(100.0);

        let frames = frames.borrow();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].width, 100.0);
        assert_eq!(frames[2].width, 150.0);
        assert_eq!(frames[2].transform, Transform::resting_at(100.0));
    }
}
