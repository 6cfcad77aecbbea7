//! Convergence loop tests for fontwatch
//!
//! Drives the polling core with a scripted environment and a virtual
//! clock: first-pass convergence, timeout exhaustion, partial batches,
//! repeated checks, and probe release.

use fontwatch::{
    CheckOptions, CheckState, FontConfig, FontRegistry, ManualClock, ProbeBox, ProbeId,
    ScriptedEnv,
};
use std::time::Duration;

const BASELINE: ProbeBox = ProbeBox { width: 10, height: 20 };

fn registry() -> FontRegistry<ScriptedEnv> {
    FontRegistry::new(ScriptedEnv::with_default_box(BASELINE))
}

fn register_scripted(
    registry: &mut FontRegistry<ScriptedEnv>,
    name: &str,
    boxes: impl IntoIterator<Item = ProbeBox>,
) -> ProbeId {
    registry.register(FontConfig::new(name));
    let class = format!("{name}_normal_normal");
    let probe = registry.env().probe_for_class(&class).unwrap();
    registry.env_mut().script_boxes(probe, boxes);
    probe
}

#[test]
fn test_font_diverged_on_first_pass_completes_within_one_tick() {
    let mut registry = registry();
    register_scripted(&mut registry, "MyFont", [ProbeBox::new(14, 20)]);

    let clock = ManualClock::new();
    let mut fired = 0;
    registry.check(&clock, CheckOptions::default(), || fired += 1);

    assert_eq!(fired, 1);
    assert_eq!(clock.sleeps(), 0);
    assert!(registry.pending().is_empty());
    assert_eq!(registry.settled().len(), 1);
}

#[test]
fn test_height_only_divergence_counts() {
    let mut registry = registry();
    register_scripted(&mut registry, "MyFont", [ProbeBox::new(10, 24)]);

    let clock = ManualClock::new();
    registry.check(&clock, CheckOptions::default(), || {});
    assert!(registry.pending().is_empty());
}

#[test]
fn test_never_converging_font_exhausts_the_try_budget() {
    let mut registry = registry();
    // Probe keeps matching the baseline forever.
    register_scripted(&mut registry, "MyFont", [BASELINE]);

    let clock = ManualClock::new();
    let options = CheckOptions::default()
        .with_timeout(Duration::from_millis(1000))
        .with_period(Duration::from_millis(25));
    let mut fired = 0;
    registry.check(&clock, options, || fired += 1);

    assert_eq!(fired, 1);
    // floor(1000 / 25) timed passes after the immediate one
    assert_eq!(clock.sleeps(), 40);
    assert_eq!(clock.elapsed(), Duration::from_millis(1000));
    assert_eq!(registry.pending().len(), 1);
    assert!(!registry.pending()[0].converged);
    assert_eq!(registry.state(), CheckState::Done);
}

#[test]
fn test_timeout_and_convergence_look_alike_through_the_callback() {
    // Same callback shape either way; only descriptor state differs.
    let mut timed_out = registry();
    register_scripted(&mut timed_out, "Stuck", [BASELINE]);
    let mut converged = registry();
    register_scripted(&mut converged, "Quick", [ProbeBox::new(30, 20)]);

    let clock = ManualClock::new();
    let options = CheckOptions::default().with_timeout(Duration::from_millis(100));
    let mut calls = 0;
    timed_out.check(&clock, options, || calls += 1);
    converged.check(&clock, options, || calls += 1);

    assert_eq!(calls, 2);
    assert_eq!(timed_out.pending().len(), 1);
    assert!(converged.pending().is_empty());
}

#[test]
fn test_worked_example_settles_after_two_ticks() {
    // Baseline (10,20); probe reports the fallback box twice, then (14,20).
    let mut registry = registry();
    register_scripted(
        &mut registry,
        "MyFont",
        [BASELINE, BASELINE, ProbeBox::new(14, 20)],
    );

    let clock = ManualClock::new();
    let mut fired = 0;
    registry.check(&clock, CheckOptions::default(), || fired += 1);

    assert_eq!(fired, 1);
    assert_eq!(clock.sleeps(), 2);
    assert_eq!(clock.elapsed(), Duration::from_millis(50));
    assert!(registry.pending().is_empty());
    assert_eq!(registry.settled().len(), 1);
    assert!(registry.settled()[0].converged);
}

#[test]
fn test_mixed_batch_prunes_fast_fonts_and_times_out_on_stuck_ones() {
    let mut registry = registry();
    register_scripted(&mut registry, "Quick", [ProbeBox::new(22, 20)]);
    register_scripted(&mut registry, "Stuck", [BASELINE]);
    register_scripted(
        &mut registry,
        "Slow",
        [BASELINE, BASELINE, BASELINE, ProbeBox::new(17, 23)],
    );

    let clock = ManualClock::new();
    let options = CheckOptions::default().with_timeout(Duration::from_millis(200));
    registry.check(&clock, options, || {});

    assert_eq!(clock.sleeps(), 8); // floor(200 / 25), Stuck never converges
    let pending: Vec<&str> = registry.pending().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(pending, ["Stuck"]);
    let mut settled: Vec<&str> = registry.settled().iter().map(|d| d.name.as_str()).collect();
    settled.sort();
    assert_eq!(settled, ["Quick", "Slow"]);
}

#[test]
fn test_check_is_idempotent_once_everything_converged() {
    let mut registry = registry();
    register_scripted(&mut registry, "MyFont", [ProbeBox::new(14, 20)]);

    let clock = ManualClock::new();
    registry.check(&clock, CheckOptions::default(), || {});
    assert_eq!(registry.state(), CheckState::Done);

    // Pending set is empty now; a repeat check completes immediately.
    let mut fired = 0;
    registry.check(&clock, CheckOptions::default(), || fired += 1);
    assert_eq!(fired, 1);
    assert_eq!(clock.sleeps(), 0);
    assert_eq!(registry.state(), CheckState::Done);
}

#[test]
fn test_rechecking_a_timed_out_registry_resumes_from_current_state() {
    let mut registry = registry();
    let probe = register_scripted(&mut registry, "MyFont", [BASELINE]);

    let clock = ManualClock::new();
    let options = CheckOptions::default().with_timeout(Duration::from_millis(100));
    registry.check(&clock, options, || {});
    assert_eq!(registry.pending().len(), 1);

    // The font lands between checks; the next check settles on pass one.
    registry.env_mut().script_boxes(probe, [ProbeBox::new(14, 20)]);
    let before = clock.sleeps();
    registry.check(&clock, options, || {});
    assert_eq!(clock.sleeps(), before);
    assert!(registry.pending().is_empty());
}

#[test]
fn test_settled_probes_are_released_after_the_loop() {
    let mut registry = registry();
    let probe = register_scripted(&mut registry, "MyFont", [ProbeBox::new(14, 20)]);

    let clock = ManualClock::new();
    registry.check(&clock, CheckOptions::default(), || {});

    assert_eq!(registry.env().detached(), &[probe]);
    assert!(registry.settled()[0].probe.is_none());
}

#[test]
fn test_pending_probe_survives_a_timed_out_check() {
    let mut registry = registry();
    let probe = register_scripted(&mut registry, "Stuck", [BASELINE]);

    let clock = ManualClock::new();
    let options = CheckOptions::default().with_timeout(Duration::from_millis(50));
    registry.check(&clock, options, || {});

    // Still watchable by a later check.
    assert!(registry.env().detached().is_empty());
    assert_eq!(registry.pending()[0].probe, Some(probe));
}

#[test]
fn test_zero_period_is_clamped_not_divided_by() {
    let mut registry = registry();
    register_scripted(&mut registry, "Stuck", [BASELINE]);

    let clock = ManualClock::new();
    let options = CheckOptions::default()
        .with_timeout(Duration::from_millis(5))
        .with_period(Duration::ZERO);
    let mut fired = 0;
    registry.check(&clock, options, || fired += 1);
    assert_eq!(fired, 1);
    assert_eq!(clock.sleeps(), 5); // period clamped to 1ms
}
