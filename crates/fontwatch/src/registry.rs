//! Font Registry
//!
//! Owns the render environment, the pending/settled descriptor lists and
//! the baseline probe; orchestrates registration.

use crate::convergence::CheckState;
use crate::env::RenderEnv;
use fontwatch_core::{
    DEFAULT_FALLBACK_FAMILY, FontConfig, FontDescriptor, FontError, ProbeBox, ProbeId,
};

/// Registry of fonts being watched for load completion.
///
/// One registry value owns all detection state, so overlapping checks over
/// hidden shared state cannot be expressed; re-running `check` is always a
/// caller decision against this value's current pending set.
pub struct FontRegistry<E: RenderEnv> {
    pub(crate) env: E,
    pub(crate) fallback_family: String,
    pub(crate) pending: Vec<FontDescriptor>,
    pub(crate) settled: Vec<FontDescriptor>,
    pub(crate) baseline_probe: ProbeId,
    pub(crate) baseline_box: Option<ProbeBox>,
    pub(crate) state: CheckState,
}

impl<E: RenderEnv> FontRegistry<E> {
    /// Registry measuring against [`DEFAULT_FALLBACK_FAMILY`]
    pub fn new(env: E) -> Self {
        Self::with_fallback(env, DEFAULT_FALLBACK_FAMILY)
            .expect("default fallback family is valid")
    }

    /// Registry measuring against a caller-chosen fallback family.
    ///
    /// Injects the fallback class rule and attaches the baseline probe
    /// before any registration happens. Fails only when the family name
    /// is empty.
    pub fn with_fallback(mut env: E, fallback_family: &str) -> Result<Self, FontError> {
        let baseline = FontDescriptor::new(FontConfig::new(fallback_family))?;
        env.inject_style(&baseline.class_rule(&baseline.name));
        let baseline_probe = env.create_probe(&baseline.class_key);
        Ok(Self {
            env,
            fallback_family: baseline.name,
            pending: Vec::new(),
            settled: Vec::new(),
            baseline_probe,
            baseline_box: None,
            state: CheckState::Idle,
        })
    }

    /// Register every config in a batch.
    ///
    /// A config that fails validation drops only that entry; the rest of
    /// the batch still registers.
    pub fn register_batch(&mut self, configs: impl IntoIterator<Item = FontConfig>) {
        for config in configs {
            self.register(config);
        }
    }

    /// Register one font.
    ///
    /// Names shorter than 3 characters after trimming are the empty-font
    /// sentinel and are skipped silently.
    pub fn register(&mut self, config: FontConfig) {
        if config.name.trim().len() < 3 {
            tracing::debug!("Skipping empty font entry '{}'", config.name);
            return;
        }
        let mut desc = match FontDescriptor::new(config) {
            Ok(desc) => desc,
            Err(err) => {
                tracing::warn!("Dropping font registration: {err}");
                return;
            }
        };

        if let Some(rule) = desc.font_face_rule() {
            self.env.inject_style(&rule);
        }
        self.env.inject_style(&desc.class_rule(&self.fallback_family));
        desc.probe = Some(self.env.create_probe(&desc.class_key));

        tracing::debug!("Registered font '{}' as .{}", desc.name, desc.class_key);
        self.pending.push(desc);
    }

    /// Register the font behind an existing CSS class.
    ///
    /// Some fonts are declared by external style sheets rather than by
    /// path; the environment resolves the class to its computed family,
    /// which then registers as a static font.
    pub fn register_by_class_name(&mut self, class_name: &str) {
        let Some(family) = self.env.computed_font_family(class_name) else {
            tracing::debug!("Class '{class_name}' resolves to no font family, skipping");
            return;
        };
        self.register(FontConfig::new(&family));
    }

    /// Register a font whose `@font-face` rule already exists elsewhere
    pub fn register_by_family_name(&mut self, name: &str, weight: &str, style: &str) {
        self.register(FontConfig::new(name).with_weight(weight).with_style(style));
    }

    /// Fonts still matching the fallback rendering
    pub fn pending(&self) -> &[FontDescriptor] {
        &self.pending
    }

    /// Fonts whose probe diverged from the baseline
    pub fn settled(&self) -> &[FontDescriptor] {
        &self.settled
    }

    /// Current check state
    pub fn state(&self) -> CheckState {
        self.state
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }
}
