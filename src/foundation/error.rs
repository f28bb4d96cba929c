/// Convenience result type used across slidereel.
pub type SlideReelResult<T> = Result<T, SlideReelError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideReelError {
    /// Invalid user-provided scene, project or timing data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The asset pipeline could not enumerate its work. Fatal for the whole run.
    #[error("scan error: {0}")]
    Scan(String),

    /// Narration or image generation failed.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Writing media to durable storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The persistence collaborator rejected a read or a patch.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Errors while evaluating playback state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A cancellation flag was observed between pipeline steps.
    #[error("operation cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideReelError {
    /// Build a [`SlideReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideReelError::Scan`] value.
    pub fn scan(msg: impl Into<String>) -> Self {
        Self::Scan(msg.into())
    }

    /// Build a [`SlideReelError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`SlideReelError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`SlideReelError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`SlideReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SlideReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True when the error aborts a whole preparation run rather than a single scene.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Scan(_) | Self::Cancelled)
    }
}

impl From<serde_json::Error> for SlideReelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
