use super::error::PipelineError;
use super::{AudioSkipReason, JobInput, JobOutput, PipelineResult, PipelineStage};
use crate::domain::audio::{self, DecodedAudio, TARGET_SAMPLE_RATE};
use crate::domain::translation::TranslationInvoker;
use crate::domain::voice::{language, EngineCache, SynthesisError, VoiceError};
use crate::infrastructure::repositories::TtsEngine;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::sync::Arc;
use uuid::Uuid;

/// Knobs the orchestrator needs from configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub default_target_language: String,
    pub tts_speed: f32,
    pub max_audio_bytes: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_target_language: "bn".to_string(),
            tts_speed: 1.0,
            max_audio_bytes: 25 * 1024 * 1024,
        }
    }
}

pub struct PipelineService {
    invoker: TranslationInvoker,
    engines: Arc<EngineCache>,
    settings: PipelineSettings,
}

impl PipelineService {
    pub fn new(
        invoker: TranslationInvoker,
        engines: Arc<EngineCache>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            invoker,
            engines,
            settings,
        }
    }

    pub fn engines(&self) -> &EngineCache {
        &self.engines
    }
}

#[async_trait]
pub trait PipelineServiceApi: Send + Sync {
    /// Run one speech-to-speech job.
    ///
    /// This operation:
    /// - Decodes the base64 audio and resamples it to 16 kHz mono
    /// - Translates the speech into target-language text (fatal on failure)
    /// - Resolves a voice for the target language and synthesizes it
    ///
    /// A missing voice or a failed synthesis still returns the text, just
    /// without audio.
    async fn run(&self, job: JobInput) -> Result<PipelineResult, PipelineError>;

    /// Same as `run`, folded into the outbound envelope. Never fails.
    async fn run_job(&self, job: JobInput) -> JobOutput {
        self.run(job).await.into()
    }
}

#[async_trait]
impl PipelineServiceApi for PipelineService {
    async fn run(&self, job: JobInput) -> Result<PipelineResult, PipelineError> {
        let job_id = Uuid::new_v4();
        let start_time = std::time::Instant::now();

        let source_language = job
            .src_lang
            .as_deref()
            .map(language::normalize)
            .filter(|code| !code.is_empty() && code != "auto");
        let target_language = language::normalize(
            job.tgt_lang
                .as_deref()
                .filter(|code| !code.trim().is_empty())
                .unwrap_or(&self.settings.default_target_language),
        );

        tracing::info!(
            job_id = %job_id,
            stage = %PipelineStage::Received,
            source_language = source_language.as_deref().unwrap_or("auto"),
            target_language = %target_language,
            "Pipeline job received"
        );

        // 1. Decode
        let audio = self
            .decode_input(job.audio.as_deref())
            .map_err(|e| fail(job_id, PipelineStage::Received, e))?;

        tracing::info!(
            job_id = %job_id,
            stage = %PipelineStage::Decoded,
            duration_secs = audio.duration_secs(),
            "Audio decoded"
        );

        // 2. Translate
        let translation = self
            .invoker
            .translate(&audio, source_language.as_deref(), &target_language)
            .await
            .map_err(|e| fail(job_id, PipelineStage::Decoded, e.into()))?;
        let text_out = translation.text;
        let original_text = Some(translation.transcript).filter(|t| !t.is_empty());

        tracing::info!(
            job_id = %job_id,
            stage = %PipelineStage::Translated,
            chars = text_out.len(),
            "Text translated"
        );

        // 3 + 4. Resolve voice and synthesize; both downgrade to text-only
        let speaker_id = speaker_id(job.voice_tone.as_deref());
        let (audio_out, audio_skipped) =
            match self.speak(job_id, &text_out, &target_language, speaker_id).await {
                Ok(encoded) => (Some(encoded), None),
                Err(reason) => (None, Some(reason)),
            };

        tracing::info!(
            job_id = %job_id,
            stage = %PipelineStage::Completed,
            has_audio = audio_out.is_some(),
            latency_ms = start_time.elapsed().as_millis(),
            "Pipeline job completed"
        );

        Ok(PipelineResult {
            text_out,
            original_text,
            audio_out,
            tgt_lang: target_language,
            audio_skipped,
        })
    }
}

impl PipelineService {
    fn decode_input(&self, payload: Option<&str>) -> Result<DecodedAudio, PipelineError> {
        let payload = payload
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PipelineError::InvalidInput("No audio provided".to_string()))?;

        // Accept data URLs as sent by browsers: "data:audio/wav;base64,...."
        let payload = match payload.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => payload,
        };

        let bytes = BASE64
            .decode(payload)
            .map_err(|e| audio::DecodeError::Base64(e.to_string()))?;

        if bytes.len() > self.settings.max_audio_bytes {
            return Err(PipelineError::InvalidInput(format!(
                "Audio payload too large: {} bytes, limit is {}",
                bytes.len(),
                self.settings.max_audio_bytes
            )));
        }

        Ok(audio::normalize(&bytes, TARGET_SAMPLE_RATE)?)
    }

    /// Voice resolution and synthesis. Errors are logged here and returned
    /// as the reason the result carries no audio.
    async fn speak(
        &self,
        job_id: Uuid,
        text: &str,
        target_language: &str,
        speaker_id: u32,
    ) -> Result<String, AudioSkipReason> {
        let engine = self
            .engines
            .get_or_build(target_language)
            .await
            .map_err(|e| {
                match &e {
                    VoiceError::Locate(_) if e.is_not_found() => tracing::warn!(
                        job_id = %job_id,
                        target_language = %target_language,
                        error = %e,
                        "No voice installed, returning text only"
                    ),
                    _ => tracing::error!(
                        job_id = %job_id,
                        target_language = %target_language,
                        error = %e,
                        "Voice unavailable, returning text only"
                    ),
                }
                AudioSkipReason::VoiceUnavailable(e.to_string())
            })?;

        tracing::debug!(
            job_id = %job_id,
            stage = %PipelineStage::VoiceResolved,
            target_language = %target_language,
            speaker_id = speaker_id,
            "Voice resolved"
        );

        let encoded = self
            .synthesize(engine.as_ref(), text, speaker_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    job_id = %job_id,
                    target_language = %target_language,
                    error = %e,
                    "Synthesis failed, returning text only"
                );
                AudioSkipReason::SynthesisFailed(e.to_string())
            })?;

        tracing::debug!(
            job_id = %job_id,
            stage = %PipelineStage::Synthesized,
            audio_b64_len = encoded.len(),
            "Speech synthesized"
        );

        Ok(encoded)
    }

    async fn synthesize(
        &self,
        engine: &dyn TtsEngine,
        text: &str,
        speaker_id: u32,
    ) -> Result<String, SynthesisError> {
        let speech = engine
            .synthesize(text, speaker_id, self.settings.tts_speed)
            .await?;

        if speech.samples.is_empty() {
            return Err(SynthesisError::EmptyOutput);
        }

        let wav = audio::encode_wav(&speech.samples, speech.sample_rate)
            .map_err(|e| SynthesisError::Encode(e.to_string()))?;

        Ok(BASE64.encode(wav))
    }
}

fn fail(job_id: Uuid, from: PipelineStage, err: PipelineError) -> PipelineError {
    tracing::error!(
        job_id = %job_id,
        stage = %PipelineStage::Failed,
        from_stage = %from,
        error = %err,
        "Pipeline job failed"
    );
    err
}

/// Speaker variant from the job's `voice_tone`: a non-negative integer is
/// used as-is, anything else picks the pack's first speaker.
fn speaker_id(voice_tone: Option<&str>) -> u32 {
    match voice_tone.map(str::trim) {
        Some(tone) if !tone.is_empty() => tone.parse().unwrap_or_else(|_| {
            tracing::debug!(voice_tone = %tone, "Unrecognized voice tone, using speaker 0");
            0
        }),
        _ => 0,
    }
}
