//! Example: Registering fonts and waiting for them to settle.
//!
//! Uses the scripted in-memory environment, so it runs anywhere; a real
//! integration would implement `RenderEnv` over a live document instead.

use fontwatch::{
    CheckOptions, FontConfig, FontRegistry, ManualClock, ProbeBox, ScriptedEnv,
};
use std::time::Duration;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut registry = FontRegistry::new(ScriptedEnv::with_default_box(ProbeBox::new(10, 20)));
    println!("fontwatch v{}", fontwatch::VERSION);

    registry.register_batch([
        FontConfig::dynamic("MyFont", "/fonts/myfont"),
        FontConfig::new("Open Sans").with_weight("bold"),
        FontConfig::new("ab"), // empty-font sentinel, skipped
    ]);
    println!("watching {} fonts", registry.pending().len());

    // Script "MyFont" to land on its third measurement.
    let probe = registry
        .env()
        .probe_for_class("MyFont_normal_normal")
        .expect("probe registered above");
    registry.env_mut().script_boxes(
        probe,
        [
            ProbeBox::new(10, 20),
            ProbeBox::new(10, 20),
            ProbeBox::new(14, 20),
        ],
    );

    let clock = ManualClock::new();
    let options = CheckOptions::default().with_timeout(Duration::from_millis(200));
    registry.check(&clock, options, || {
        println!("check finished");
    });

    for desc in registry.settled() {
        println!("  loaded: {} (.{})", desc.name, desc.class_key);
    }
    for desc in registry.pending() {
        println!("  still pending: {}", desc.name);
    }
    println!("virtual time spent: {}ms", clock.elapsed().as_millis());
}
