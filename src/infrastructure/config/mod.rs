use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Voice assets and TTS
    pub voice_assets_dir: PathBuf,
    pub default_target_language: String,
    pub tts_speed: f32,
    pub tts_num_threads: usize,
    // Translation backend
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub transcription_model: String,
    pub translation_model: String,
    // Request limits
    pub max_audio_bytes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            voice_assets_dir: env::var("VOICE_ASSETS_DIR")
                .unwrap_or_else(|_| "/tts_models".to_string())
                .into(),
            default_target_language: env::var("DEFAULT_TARGET_LANGUAGE")
                .unwrap_or_else(|_| "bn".to_string()),
            tts_speed: env::var("TTS_SPEED")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()?,
            tts_num_threads: env::var("TTS_NUM_THREADS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()?,
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL").ok().filter(|url| !url.is_empty()),
            transcription_model: env::var("TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| "whisper-1".to_string()),
            translation_model: env::var("TRANSLATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            max_audio_bytes: env::var("MAX_AUDIO_BYTES")
                .unwrap_or_else(|_| (25 * 1024 * 1024).to_string())
                .parse()?,
        };

        if !(config.tts_speed.is_finite() && config.tts_speed > 0.0) {
            return Err(format!("TTS_SPEED must be positive, got {}", config.tts_speed).into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
