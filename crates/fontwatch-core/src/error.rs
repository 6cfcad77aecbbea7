//! Registration error types.

/// Error raised while validating a font registration.
///
/// Validation happens synchronously at registration time; the polling
/// loop itself never produces errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FontError {
    #[error("font family name is required")]
    MissingName,
    #[error("dynamic font '{name}' requires a source path")]
    MissingPath { name: String },
}
