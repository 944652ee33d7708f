pub mod openai_translation_repository;
pub mod sherpa_tts_repository;
pub mod translation_repository;
pub mod tts_repository;

pub use openai_translation_repository::OpenAiTranslationRepository;
pub use sherpa_tts_repository::{SherpaTtsEngine, SherpaTtsEngineFactory};
pub use translation_repository::{
    TranslationEngine, TranslationOptions, TranslationOutput, TranslationRequest,
};
pub use tts_repository::{SynthesizedAudio, TtsEngine, TtsEngineFactory};
