use crate::domain::audio::DecodedAudio;
use crate::infrastructure::repositories::{
    TranslationEngine, TranslationOptions, TranslationOutput, TranslationRequest,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("translation failed: {0}")]
    Translation(String),
    #[error("no speech recognized in audio")]
    EmptyTranscript,
    #[error("translation engine returned no text")]
    EmptyTranslation,
}

/// Thin wrapper over the translation engine that always asks for text only.
#[derive(Clone)]
pub struct TranslationInvoker {
    engine: Arc<dyn TranslationEngine>,
}

impl TranslationInvoker {
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self { engine }
    }

    pub async fn translate(
        &self,
        audio: &DecodedAudio,
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<TranslationOutput, TranslationError> {
        let start_time = std::time::Instant::now();

        let request = TranslationRequest {
            samples: &audio.samples,
            sample_rate: audio.sample_rate,
            source_language,
            target_language,
            options: TranslationOptions {
                generate_speech: false,
            },
        };

        let output = self.engine.translate(request).await?;
        let text = output.text.trim().to_string();
        let transcript = output.transcript.trim().to_string();

        if text.is_empty() {
            return Err(TranslationError::EmptyTranslation);
        }

        tracing::info!(
            source_language = source_language.unwrap_or("auto"),
            target_language = %target_language,
            duration_secs = audio.duration_secs(),
            transcript_chars = transcript.len(),
            chars = text.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Translation completed"
        );

        Ok(TranslationOutput { transcript, text })
    }
}
