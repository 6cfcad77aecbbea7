//! Generated Style Rules
//!
//! CSS text templates for `@font-face` and probe class rules. The text is
//! appended verbatim to the managed style sheet; nothing is parsed back.

use crate::{FontDescriptor, FontKind};

/// Probe string whose glyph mix gives distinct boxes across most faces.
pub const PROBE_TEXT: &str = "BAa17glESbswy";

/// Inline styling for a probe element: off-screen, unclamped box, large
/// glyphs so metric differences survive integer rounding.
pub const PROBE_CSS_TEXT: &str = "display:block;position:absolute;\
top:-999px;left:-999px;font-size:300px;width:auto;height:auto;\
line-height:normal;margin:0;padding:0;font-variant:normal;\
white-space:nowrap;";

/// Fallback family used for the baseline probe when none is configured.
pub const DEFAULT_FALLBACK_FAMILY: &str = "Arial";

impl FontDescriptor {
    /// `@font-face` rule text for dynamic fonts; `None` for static ones.
    ///
    /// The `src` list derives every format URL from the single path stem.
    pub fn font_face_rule(&self) -> Option<String> {
        if self.kind != FontKind::Dynamic {
            return None;
        }
        let path = self.path.as_deref()?;
        let name = &self.name;
        Some(format!(
            "@font-face {{\n\
             \x20 font-family: '{name}';\n\
             \x20 font-weight: {weight};\n\
             \x20 font-style: {style};\n\
             \x20 src: url('{path}.eot');\n\
             \x20 src: url('{path}.eot#iefix') format('embedded-opentype'),\n\
             \x20      url('{path}.woff') format('woff'),\n\
             \x20      url('{path}.ttf') format('truetype'),\n\
             \x20      url('{path}.svg#{name}') format('svg');\n\
             }}\n",
            weight = self.weight,
            style = self.style,
        ))
    }

    /// Class rule binding `.class_key` to the family, with the fallback
    /// family appended so the probe renders something before the font lands.
    pub fn class_rule(&self, fallback_family: &str) -> String {
        format!(
            ".{class} {{\n\
             \x20 font-family: '{name}', {fallback_family} !important;\n\
             \x20 font-weight: {weight};\n\
             \x20 font-style: {style};\n\
             }}\n",
            class = self.class_key,
            name = self.name,
            weight = self.weight,
            style = self.style,
        )
    }
}
