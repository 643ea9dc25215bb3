#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabflow_core::{PanelStrip, TrackingState, TransformEngine};

#[derive(Debug, Arbitrary)]
struct Input {
    widths: Vec<u16>,
    container: u16,
    start: u8,
    snap_epsilon: f64,
    samples: Vec<f64>,
}

fuzz_target!(|input: Input| {
    // Tab widths 1..=1024 px, at most 16 tabs.
    let widths: Vec<f64> = input
        .widths
        .iter()
        .take(16)
        .map(|&w| f64::from(w % 1024 + 1))
        .collect();
    let Ok(strip) = PanelStrip::contiguous(&widths, f64::from(input.container) + 1.0) else {
        return;
    };
    let n = strip.len();
    let engine = TransformEngine::new().with_snap_epsilon(input.snap_epsilon);
    let mut tracking = TrackingState::anchored(usize::from(input.start) % n);

    for &sample in input.samples.iter().take(256) {
        let step = engine.step(&tracking, sample, &strip);

        // Post-conditions that must always hold:
        assert!(step.tabs.previous < n, "previous tab OOB");
        assert!(step.tabs.current < n, "current tab OOB");
        assert!(step.tabs.next < n, "next tab OOB");
        assert!(step.target < n, "target tab OOB");
        assert!((0.0..=1.0).contains(&step.progress), "progress {}", step.progress);
        if step.relative_scroll.is_finite() && step.relative_scroll.abs() < 1e9 {
            assert!(step.transform.translate_x.is_finite(), "translate not finite");
            assert!(
                step.transform.scale_x.is_finite() && step.transform.scale_x > 0.0,
                "bad scale {}",
                step.transform.scale_x
            );
        }

        // Repeating a sample never moves the anchor.
        let again = engine.step(&step.tracking, step.relative_scroll, &strip);
        assert_eq!(again.crossed, None, "repeat crossed");
        tracking = step.tracking;
    }
});
