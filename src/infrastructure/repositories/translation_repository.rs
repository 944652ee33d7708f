use crate::domain::translation::TranslationError;
use async_trait::async_trait;

/// What the caller wants back from the translation engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslationOptions {
    /// Ask the engine to also speak the translation. The pipeline always
    /// leaves this off and synthesizes with its own voices.
    pub generate_speech: bool,
}

/// One speech-to-text-translation call.
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    /// Mono PCM samples
    pub samples: &'a [f32],
    pub sample_rate: u32,
    /// Canonical source language, or `None` to let the engine detect it
    pub source_language: Option<&'a str>,
    /// Canonical target language
    pub target_language: &'a str,
    pub options: TranslationOptions,
}

/// What the engine heard and what it made of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationOutput {
    /// Source-language transcript
    pub transcript: String,
    /// Target-language text
    pub text: String,
}

/// Engine that turns recorded speech into text in another language.
///
/// Implementations own transcription and translation and report both.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<TranslationOutput, TranslationError>;
}
