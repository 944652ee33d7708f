use crate::domain::audio::DecodeError;
use crate::domain::translation::TranslationError;
use crate::error::AppError;

/// Errors that end a pipeline job without any output text.
///
/// Voice and synthesis problems never appear here; the orchestrator
/// downgrades them to a text-only result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("audio decoding failed: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidInput(msg) => AppError::BadRequest(msg),
            err @ PipelineError::Decode(_) => AppError::UnprocessableAudio(err.to_string()),
            PipelineError::Translation(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
