//! Font Descriptors
//!
//! Registration records and the validated descriptor built from them.

use crate::{FontError, ProbeId};
use serde::{Deserialize, Serialize};

/// How a font's `@font-face` rule comes into existence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKind {
    /// The `@font-face` rule already exists elsewhere (e.g. external CSS).
    #[default]
    Static,
    /// A `@font-face` rule must be generated from a supplied source path.
    Dynamic,
}

/// Registration input for one font.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontConfig {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "normal")]
    pub weight: String,
    #[serde(default = "normal")]
    pub style: String,
    #[serde(rename = "type", default)]
    pub kind: FontKind,
}

fn normal() -> String {
    "normal".to_string()
}

impl FontConfig {
    /// Static font known by family name only
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            weight: normal(),
            style: normal(),
            kind: FontKind::Static,
        }
    }

    /// Dynamic font loaded from a path stem (extension added per format)
    pub fn dynamic(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: Some(path.to_string()),
            kind: FontKind::Dynamic,
            ..Self::new(name)
        }
    }

    pub fn with_weight(mut self, weight: &str) -> Self {
        self.weight = weight.to_string();
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = style.to_string();
        self
    }
}

/// A validated, registered font being watched for load completion.
///
/// Built from a [`FontConfig`]; only the measurement step flips
/// `converged`, and only registration assigns `probe`.
#[derive(Debug, Clone)]
pub struct FontDescriptor {
    pub name: String,
    pub path: Option<String>,
    pub weight: String,
    pub style: String,
    pub kind: FontKind,
    /// Class selector name binding this font's probe to its family.
    pub class_key: String,
    /// True once the probe's box diverged from the fallback baseline.
    pub converged: bool,
    /// Probe element handle, assigned at registration, released after a check.
    pub probe: Option<ProbeId>,
}

impl FontDescriptor {
    /// Validate a registration record into a descriptor.
    ///
    /// Fails when the name is empty after trimming, or when a dynamic
    /// font carries no source path.
    pub fn new(config: FontConfig) -> Result<Self, FontError> {
        let name = config.name.replace('\'', "").trim().to_string();
        if name.is_empty() {
            return Err(FontError::MissingName);
        }
        if config.kind == FontKind::Dynamic
            && config.path.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(FontError::MissingPath { name });
        }

        let class_key = class_key(&name, &config.weight, &config.style);
        Ok(Self {
            name,
            path: config.path,
            weight: config.weight,
            style: config.style,
            kind: config.kind,
            class_key,
            converged: false,
            probe: None,
        })
    }
}

/// Derive the class selector name for a (name, weight, style) triple.
///
/// Deterministic; strips everything a class selector cannot carry.
fn class_key(name: &str, weight: &str, style: &str) -> String {
    let key = format!("{name}_{weight}_{style}");
    key.chars()
        .filter_map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => Some(c),
            '.' | ' ' => Some('_'),
            _ => None,
        })
        .collect()
}
