//! fontwatch-core
//!
//! Data model for web-font load detection: registration records,
//! validated font descriptors, generated style rules, probe geometry.

mod descriptor;
mod error;
mod probe;
mod style;

pub use descriptor::{FontConfig, FontDescriptor, FontKind};
pub use error::FontError;
pub use probe::{ProbeBox, ProbeId};
pub use style::{DEFAULT_FALLBACK_FAMILY, PROBE_CSS_TEXT, PROBE_TEXT};
