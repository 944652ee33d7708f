use crate::domain::voice::{SynthesisError, VoiceAsset};
use async_trait::async_trait;
use std::sync::Arc;

/// Raw PCM produced by a TTS engine.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// An initialized TTS engine bound to a single voice asset.
///
/// Engines are expensive to build and cheap to call, so the pipeline keeps
/// one per language in the engine cache and calls it concurrently.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Synthesize `text` with the given speaker variant.
    ///
    /// # Arguments
    /// * `speaker_id` - Voice variant inside multi-speaker packs (0 for single-speaker)
    /// * `speed` - Speaking rate, 1.0 is the model's natural pace
    async fn synthesize(
        &self,
        text: &str,
        speaker_id: u32,
        speed: f32,
    ) -> Result<SynthesizedAudio, SynthesisError>;
}

/// Builds engines from located voice assets.
#[async_trait]
pub trait TtsEngineFactory: Send + Sync {
    async fn build(&self, asset: &VoiceAsset) -> Result<Arc<dyn TtsEngine>, SynthesisError>;
}
