//! Engine configuration.

use crate::error::EngineError;

/// Environment variable controlling baseline structural pre-validation.
pub const BASELINE_VALIDATION_ENV: &str = "ROWCHECK_BASELINE_VALIDATION";

/// Runtime switches for a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Report the parser's baseline structural failures (default: `true`).
    /// When off, only rule-based failures are returned.
    pub baseline_validation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baseline_validation: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default |
    /// |--------------------------------|---------|
    /// | `ROWCHECK_BASELINE_VALIDATION` | `true`  |
    pub fn from_env() -> Result<Self, EngineError> {
        let baseline_validation = match std::env::var(BASELINE_VALIDATION_ENV) {
            Ok(raw) => parse_flag(BASELINE_VALIDATION_ENV, &raw)?,
            Err(_) => Self::default().baseline_validation,
        };

        Ok(Self {
            baseline_validation,
        })
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, EngineError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(EngineError::Config(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}
