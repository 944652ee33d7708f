use super::tts_repository::{SynthesizedAudio, TtsEngine, TtsEngineFactory};
use crate::domain::voice::{SynthesisError, VoiceAsset};
use async_trait::async_trait;
use parking_lot::Mutex;
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};
use sherpa_rs::OnnxConfig;
use std::path::Path;
use std::sync::Arc;

/// A loaded acoustic model. Generation is CPU-bound and needs exclusive access.
trait SpeechModel: Send {
    fn generate(
        &mut self,
        text: &str,
        speaker_id: i32,
        speed: f32,
    ) -> Result<SynthesizedAudio, String>;
}

impl SpeechModel for VitsTts {
    fn generate(
        &mut self,
        text: &str,
        speaker_id: i32,
        speed: f32,
    ) -> Result<SynthesizedAudio, String> {
        let audio = self
            .create(text, speaker_id, speed)
            .map_err(|e| e.to_string())?;
        Ok(SynthesizedAudio {
            samples: audio.samples,
            sample_rate: audio.sample_rate as u32,
        })
    }
}

/// Loads sherpa-onnx VITS voices in-process.
pub struct SherpaTtsEngineFactory {
    num_threads: usize,
}

impl SherpaTtsEngineFactory {
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: num_threads.max(1),
        }
    }

    fn vits_config(&self, asset: &VoiceAsset) -> VitsTtsConfig {
        VitsTtsConfig {
            model: path_string(&asset.model_path),
            tokens: path_string(&asset.tokens_path),
            data_dir: asset.data_dir.as_deref().map(path_string).unwrap_or_default(),
            length_scale: 1.0,
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            onnx_config: OnnxConfig {
                num_threads: i32::try_from(self.num_threads).unwrap_or(i32::MAX),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[async_trait]
impl TtsEngineFactory for SherpaTtsEngineFactory {
    async fn build(&self, asset: &VoiceAsset) -> Result<Arc<dyn TtsEngine>, SynthesisError> {
        // The native loader does not report unreadable files; check first
        for path in [&asset.model_path, &asset.tokens_path] {
            let metadata = tokio::fs::metadata(path).await.map_err(|e| {
                SynthesisError::EngineConstruction(format!("{}: {}", path.display(), e))
            })?;
            if metadata.len() == 0 {
                return Err(SynthesisError::EngineConstruction(format!(
                    "{} is empty",
                    path.display()
                )));
            }
        }

        let start_time = std::time::Instant::now();
        let config = self.vits_config(asset);
        let model = tokio::task::spawn_blocking(move || VitsTts::new(config))
            .await
            .map_err(|e| {
                SynthesisError::EngineConstruction(format!(
                    "loading {}: {}",
                    asset.model_path.display(),
                    e
                ))
            })?;

        tracing::info!(
            language = %asset.language,
            family = %asset.family,
            model = %asset.model_path.display(),
            has_data_dir = asset.data_dir.is_some(),
            num_threads = self.num_threads,
            load_ms = start_time.elapsed().as_millis(),
            "sherpa-onnx TTS engine loaded"
        );

        Ok(Arc::new(SherpaTtsEngine::with_model(
            asset.language.clone(),
            Box::new(model),
        )))
    }
}

/// One loaded voice. Calls are serialized on the model and run off the
/// async runtime.
pub struct SherpaTtsEngine {
    language: String,
    model: Arc<Mutex<Box<dyn SpeechModel>>>,
}

impl SherpaTtsEngine {
    fn with_model(language: String, model: Box<dyn SpeechModel>) -> Self {
        Self {
            language,
            model: Arc::new(Mutex::new(model)),
        }
    }
}

#[async_trait]
impl TtsEngine for SherpaTtsEngine {
    async fn synthesize(
        &self,
        text: &str,
        speaker_id: u32,
        speed: f32,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        let start_time = std::time::Instant::now();
        let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
        let sid = i32::try_from(speaker_id).unwrap_or(0);

        tracing::debug!(
            language = %self.language,
            speaker_id = sid,
            text_length = text.len(),
            "Calling sherpa-onnx TTS"
        );

        let model = self.model.clone();
        let owned_text = text.to_string();
        let audio = tokio::task::spawn_blocking(move || model.lock().generate(&owned_text, sid, speed))
            .await
            .map_err(|e| SynthesisError::Failed(format!("synthesis task: {}", e)))?
            .map_err(SynthesisError::Failed)?;

        tracing::info!(
            provider = "sherpa-onnx",
            language = %self.language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
