use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `postcraft`.
///
/// The decision engine never lets these escape `DecisionEngine::decide`; they
/// surface to library callers from construction, configuration and the CLI.
#[derive(Debug, Error)]
pub enum PostcraftError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Engine ───────────────────────────────────────────────────────────
    #[error("engine: {0}")]
    Engine(#[from] EngineError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Engine errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-range snapshot field.
    #[error("invalid input: {field}: {message}")]
    InputValidation { field: String, message: String },

    /// Failure while ranking topics, sampling arms or assembling content.
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("template: {0}")]
    Template(#[from] tera::Error),

    #[error("pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl EngineError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InputValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from snapshot validation rather than generation.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputValidation { .. })
    }
}
