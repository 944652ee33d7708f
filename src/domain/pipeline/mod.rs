pub mod error;
pub mod service;

pub use error::PipelineError;
pub use service::{PipelineService, PipelineServiceApi, PipelineSettings};

use serde::{Deserialize, Serialize};

/// Job envelope accepted by the pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobInput {
    /// Base64-encoded audio container (wav, mp3, ogg, flac...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgt_lang: Option<String>,
    /// Speaker variant for multi-speaker voices, e.g. "3"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_tone: Option<String>,
}

/// Serverless-style request wrapper: `{ "input": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    pub input: JobInput,
}

/// Request lifecycle, used for tracing each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Decoded,
    Translated,
    VoiceResolved,
    Synthesized,
    Completed,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::Decoded => "decoded",
            PipelineStage::Translated => "translated",
            PipelineStage::VoiceResolved => "voice_resolved",
            PipelineStage::Synthesized => "synthesized",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Why a completed job carries no audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSkipReason {
    VoiceUnavailable(String),
    SynthesisFailed(String),
}

/// Outcome of a job that reached the translated state.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub text_out: String,
    /// Source-language transcript, when the engine reported one
    pub original_text: Option<String>,
    /// Base64-encoded WAV, present only when synthesis succeeded
    pub audio_out: Option<String>,
    /// Canonical target language
    pub tgt_lang: String,
    pub audio_skipped: Option<AudioSkipReason>,
}

impl PipelineResult {
    pub fn is_partial(&self) -> bool {
        self.audio_out.is_none()
    }
}

/// Outbound envelope: either a success body or `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobOutput {
    Success {
        text_out: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio_out: Option<String>,
        status: String,
    },
    Failure {
        error: String,
    },
}

impl From<PipelineResult> for JobOutput {
    fn from(result: PipelineResult) -> Self {
        JobOutput::Success {
            text_out: result.text_out,
            original_text: result.original_text,
            audio_out: result.audio_out,
            status: "success".to_string(),
        }
    }
}

impl From<Result<PipelineResult, PipelineError>> for JobOutput {
    fn from(result: Result<PipelineResult, PipelineError>) -> Self {
        match result {
            Ok(result) => result.into(),
            Err(e) => JobOutput::Failure {
                error: e.to_string(),
            },
        }
    }
}
