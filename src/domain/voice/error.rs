use std::path::PathBuf;

/// Why the locator could not hand back a usable voice asset.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocateError {
    #[error("no voice installed for '{language}' (tried: {})", tried.join(", "))]
    NotFound { language: String, tried: Vec<String> },
    #[error("invalid voice asset at {}: {reason}", path.display())]
    InvalidAsset { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthesisError {
    #[error("engine construction failed: {0}")]
    EngineConstruction(String),
    #[error("synthesis failed: {0}")]
    Failed(String),
    #[error("engine produced no audio")]
    EmptyOutput,
    #[error("audio encoding failed: {0}")]
    Encode(String),
}

/// Error returned by the engine cache. Never stored in the cache.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VoiceError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Construction(#[from] SynthesisError),
}

impl VoiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VoiceError::Locate(LocateError::NotFound { .. }))
    }
}
