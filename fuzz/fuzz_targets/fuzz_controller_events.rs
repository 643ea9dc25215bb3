#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabflow_core::Phase;
use tabflow_runtime::{IndicatorConfig, IndicatorController, StaticGeometry, TweenDriver};
use web_time::Duration;

#[derive(Debug, Arbitrary)]
enum Event {
    Scroll(i32),
    Select(u8),
    Pump(u16),
    Interrupt,
    Resize { container: u16, drop_last: bool },
}

#[derive(Debug, Arbitrary)]
struct Input {
    widths: Vec<u8>,
    start: u8,
    preemptive: bool,
    touching: bool,
    events: Vec<Event>,
}

fuzz_target!(|input: Input| {
    let widths: Vec<f64> = input
        .widths
        .iter()
        .take(12)
        .map(|&w| f64::from(w) + 8.0)
        .collect();
    if widths.is_empty() {
        return;
    }
    let config = IndicatorConfig {
        preemptive: input.preemptive,
        ..IndicatorConfig::default()
    };
    let geometry = StaticGeometry::contiguous(&widths, 320.0);
    let start = usize::from(input.start) % widths.len();
    let touching = input.touching;
    let Ok(c) = IndicatorController::new(geometry, TweenDriver::new(), start, &config) else {
        return;
    };
    let mut c = c.with_touch(move || touching);
    let _ = c.start();
    let mut live = widths.clone();

    for event in input.events.iter().take(128) {
        match *event {
            Event::Scroll(px) => {
                c.driver_mut().interrupt();
                c.pump(Duration::ZERO);
                c.on_scroll(f64::from(px));
            }
            Event::Select(i) => {
                let _ = c.select(usize::from(i));
            }
            Event::Pump(ms) => {
                c.pump(Duration::from_millis(u64::from(ms)));
            }
            Event::Interrupt => {
                c.driver_mut().interrupt();
                c.pump(Duration::ZERO);
            }
            Event::Resize {
                container,
                drop_last,
            } => {
                if drop_last && live.len() > 1 {
                    live.pop();
                    c.geometry_mut().set_widths(&live);
                }
                c.geometry_mut()
                    .set_container_width(Some(f64::from(container) + 1.0));
                c.on_resize();
            }
        }

        // Post-conditions that must always hold:
        assert!(c.current_index() < live.len(), "index OOB");
        let t = c.indicator_transform();
        assert!(t.translate_x.is_finite(), "translate not finite");
        assert!(t.scale_x.is_finite() && t.scale_x > 0.0, "bad scale");
        if !matches!(c.phase(), Phase::ProgrammaticScrolling { .. }) {
            assert!(c.driver().is_snapping(), "snapping left off while not scrolling");
        }
    }
});
