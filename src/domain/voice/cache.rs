use super::asset::VoiceLocator;
use super::error::VoiceError;
use super::language;
use crate::infrastructure::repositories::{TtsEngine, TtsEngineFactory};
use moka::future::Cache;
use std::sync::Arc;

/// Process-wide table of constructed TTS engines keyed by canonical language.
///
/// Concurrent first requests for one language share a single construction;
/// failures (missing voice, broken pack) are handed back to every waiting
/// caller and nothing is stored, so the next request resolves again.
pub struct EngineCache {
    locator: Arc<VoiceLocator>,
    factory: Arc<dyn TtsEngineFactory>,
    engines: Cache<String, Arc<dyn TtsEngine>>,
}

impl EngineCache {
    pub fn new(locator: Arc<VoiceLocator>, factory: Arc<dyn TtsEngineFactory>) -> Self {
        // No capacity bound or expiry: an engine is never rebuilt once cached.
        let engines = Cache::builder().build();

        Self {
            locator,
            factory,
            engines,
        }
    }

    pub fn locator(&self) -> &VoiceLocator {
        &self.locator
    }

    /// Return the engine for `language`, building it on first use.
    pub async fn get_or_build(&self, language: &str) -> Result<Arc<dyn TtsEngine>, VoiceError> {
        let key = language::normalize(language);

        if let Some(engine) = self.engines.get(&key).await {
            tracing::debug!(language = %key, "TTS engine cache hit");
            return Ok(engine);
        }

        self.engines
            .try_get_with(key.clone(), self.build(&key))
            .await
            .map_err(|e| (*e).clone())
    }

    /// Languages that currently hold a constructed engine, sorted.
    pub fn cached_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .engines
            .iter()
            .map(|(language, _)| language.as_ref().clone())
            .collect();
        languages.sort();
        languages
    }

    async fn build(&self, language: &str) -> Result<Arc<dyn TtsEngine>, VoiceError> {
        let start_time = std::time::Instant::now();

        let asset = self.locator.locate(language)?;

        tracing::info!(
            language = %language,
            family = %asset.family,
            dir = %asset.dir.display(),
            "Building TTS engine"
        );

        let engine = self.factory.build(&asset).await.map_err(|e| {
            tracing::error!(
                language = %language,
                dir = %asset.dir.display(),
                error = %e,
                "TTS engine construction failed"
            );
            e
        })?;

        tracing::info!(
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            "TTS engine cached"
        );

        Ok(engine)
    }
}
