use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use voxbridge::domain::translation::TranslationError;
use voxbridge::domain::voice::{SynthesisError, VoiceAsset};
use voxbridge::infrastructure::repositories::{
    SynthesizedAudio, TranslationEngine, TranslationOutput, TranslationRequest, TtsEngine,
    TtsEngineFactory,
};

/// What the fake translation engine saw for one call
#[derive(Debug, Clone, PartialEq)]
pub struct SeenTranslation {
    pub source_language: Option<String>,
    pub target_language: String,
    pub sample_rate: u32,
    pub generate_speech: bool,
}

/// Translation engine that hears "hello" and replies with a fixed text per
/// target language
#[derive(Default)]
pub struct FakeTranslationEngine {
    pub fail_with: Option<String>,
    pub seen: Mutex<Vec<SeenTranslation>>,
}

impl FakeTranslationEngine {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn reply_for(target_language: &str) -> String {
        match target_language {
            "bn" => "হ্যালো".to_string(),
            "es" => "hola".to_string(),
            other => format!("hello ({})", other),
        }
    }
}

#[async_trait]
impl TranslationEngine for FakeTranslationEngine {
    async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<TranslationOutput, TranslationError> {
        self.seen.lock().unwrap().push(SeenTranslation {
            source_language: request.source_language.map(str::to_string),
            target_language: request.target_language.to_string(),
            sample_rate: request.sample_rate,
            generate_speech: request.options.generate_speech,
        });

        match &self.fail_with {
            Some(message) => Err(TranslationError::Translation(message.clone())),
            None => Ok(TranslationOutput {
                transcript: "hello".to_string(),
                text: Self::reply_for(request.target_language),
            }),
        }
    }
}

struct ToneEngine {
    fail: bool,
}

#[async_trait]
impl TtsEngine for ToneEngine {
    async fn synthesize(
        &self,
        text: &str,
        _speaker_id: u32,
        _speed: f32,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        if self.fail {
            return Err(SynthesisError::Failed("voice model rejected input".to_string()));
        }
        Ok(SynthesizedAudio {
            samples: vec![0.2; 220 * text.chars().count().max(1)],
            sample_rate: 22_050,
        })
    }
}

/// Factory that counts constructions and can be told to break
#[derive(Default)]
pub struct FakeTtsFactory {
    pub fail_build: bool,
    pub fail_synthesis: bool,
    pub builds: AtomicUsize,
}

impl FakeTtsFactory {
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsEngineFactory for FakeTtsFactory {
    async fn build(&self, asset: &VoiceAsset) -> Result<Arc<dyn TtsEngine>, SynthesisError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.fail_build {
            return Err(SynthesisError::EngineConstruction(format!(
                "cannot load {}",
                asset.model_path.display()
            )));
        }
        Ok(Arc::new(ToneEngine {
            fail: self.fail_synthesis,
        }))
    }
}
