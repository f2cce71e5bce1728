/// Convenience result type used across the hero engine.
pub type HeroResult<T> = Result<T, HeroError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Missing scene targets are deliberately not represented here: writes to an
/// absent element are skipped, never reported.
#[derive(thiserror::Error, Debug)]
pub enum HeroError {
    /// Invalid user-provided configuration or timeline data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building, compiling or sampling timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while registering or addressing scene elements.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeroError {
    /// Build a [`HeroError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeroError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`HeroError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`HeroError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HeroError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
