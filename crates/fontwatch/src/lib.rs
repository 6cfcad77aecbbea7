//! fontwatch
//!
//! Detects when web fonts have finished loading by rendering a probe
//! string under each registered font and polling its box against a
//! fallback font's baseline box. A font whose probe diverges from the
//! baseline has visibly replaced the fallback, so it counts as loaded.
//!
//! # Example
//! ```rust,ignore
//! use fontwatch::{CheckOptions, FontConfig, FontRegistry, SystemClock};
//!
//! let mut registry = FontRegistry::new(env);
//! registry.register_batch([FontConfig::dynamic("MyFont", "/fonts/myfont")]);
//! registry.check(&SystemClock, CheckOptions::default(), || {
//!     println!("fonts settled (or timed out)");
//! });
//! ```

mod clock;
mod convergence;
mod env;
mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use convergence::{CheckOptions, CheckState};
pub use env::{RenderEnv, ScriptedEnv};
pub use registry::FontRegistry;

// Re-export the data model for convenience
pub use fontwatch_core::{
    DEFAULT_FALLBACK_FAMILY, FontConfig, FontDescriptor, FontError, FontKind, PROBE_CSS_TEXT,
    PROBE_TEXT, ProbeBox, ProbeId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
