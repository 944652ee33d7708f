use super::translation_repository::{TranslationEngine, TranslationOutput, TranslationRequest};
use crate::domain::audio::encode_wav;
use crate::domain::translation::TranslationError;
use crate::domain::voice::language;
use async_openai::{
    config::OpenAIConfig,
    types::{
        AudioInput, ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateTranscriptionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Speech translation through an OpenAI-compatible API: Whisper
/// transcription followed by a chat-model translation.
pub struct OpenAiTranslationRepository {
    client: Arc<Client<OpenAIConfig>>,
    transcription_model: String,
    translation_model: String,
}

impl OpenAiTranslationRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        transcription_model: String,
        translation_model: String,
    ) -> Self {
        Self {
            client,
            transcription_model,
            translation_model,
        }
    }

    async fn transcribe(
        &self,
        samples: &[f32],
        sample_rate: u32,
        source_language: Option<&str>,
    ) -> Result<String, TranslationError> {
        let wav = encode_wav(samples, sample_rate)
            .map_err(|e| TranslationError::Transcription(format!("wav encode: {}", e)))?;

        let mut builder = CreateTranscriptionRequestArgs::default();
        builder
            .file(AudioInput::from_vec_u8("audio.wav".to_string(), wav))
            .model(self.transcription_model.clone());
        // Whisper only takes ISO 639-1 hints; unknown codes are left to detection
        if let Some(code) = source_language.filter(|code| language::is_known(code)) {
            builder.language(language::normalize(code));
        }
        let request = builder
            .build()
            .map_err(|e| TranslationError::Transcription(format!("request: {}", e)))?;

        tracing::debug!(
            model = %self.transcription_model,
            source_language = source_language.unwrap_or("auto"),
            "Sending audio to OpenAI transcription"
        );

        let response = self.client.audio().transcribe(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.transcription_model,
                "OpenAI transcription failed"
            );
            TranslationError::Transcription(e.to_string())
        })?;

        Ok(response.text.trim().to_string())
    }

    async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let target_name = language::display_name(target_language);

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(format!(
                "You are a translation engine. Translate the user's text into {}. \
                 Reply with the translation only, without quotes or commentary.",
                target_name
            ))
            .build()
            .map_err(|e| TranslationError::Translation(format!("request: {}", e)))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(text.to_string())
            .build()
            .map_err(|e| TranslationError::Translation(format!("request: {}", e)))?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![system.into(), user.into()];
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.translation_model.clone())
            .temperature(0.0)
            .messages(messages)
            .build()
            .map_err(|e| TranslationError::Translation(format!("request: {}", e)))?;

        tracing::debug!(
            model = %self.translation_model,
            target_language = %target_language,
            text_length = text.len(),
            "Calling OpenAI chat translation"
        );

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.translation_model,
                target_language = %target_language,
                "OpenAI translation failed"
            );
            TranslationError::Translation(e.to_string())
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(TranslationError::EmptyTranslation)
    }
}

#[async_trait]
impl TranslationEngine for OpenAiTranslationRepository {
    async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<TranslationOutput, TranslationError> {
        let start_time = std::time::Instant::now();

        if request.options.generate_speech {
            tracing::debug!("Speech output requested from translation engine; ignoring, text only");
        }

        let transcript = self
            .transcribe(request.samples, request.sample_rate, request.source_language)
            .await?;

        if transcript.is_empty() {
            return Err(TranslationError::EmptyTranscript);
        }

        tracing::info!(
            source_language = request.source_language.unwrap_or("auto"),
            chars = transcript.len(),
            "Speech transcribed"
        );

        let same_language = request
            .source_language
            .map(|source| language::normalize(source) == language::normalize(request.target_language))
            .unwrap_or(false);

        let translated = if same_language {
            transcript.clone()
        } else {
            self.translate_text(&transcript, request.target_language)
                .await?
        };

        tracing::info!(
            provider = "openai",
            transcription_model = %self.transcription_model,
            translation_model = %self.translation_model,
            latency_ms = start_time.elapsed().as_millis(),
            chars = translated.len(),
            "Speech translation completed"
        );

        Ok(TranslationOutput {
            transcript,
            text: translated,
        })
    }
}
