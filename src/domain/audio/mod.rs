pub mod normalizer;
pub mod wav;

pub use normalizer::{decode, normalize, resample, DecodedAudio, TARGET_SAMPLE_RATE};
pub use wav::encode_wav;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("audio payload is empty")]
    Empty,
    #[error("audio payload is not valid base64: {0}")]
    Base64(String),
    #[error("unrecognized audio container: {0}")]
    Probe(String),
    #[error("no audio track found")]
    NoTrack,
    #[error("unknown sample rate")]
    UnknownSampleRate,
    #[error("unsupported codec: {0}")]
    Codec(String),
    #[error("failed to read audio packet: {0}")]
    Packet(String),
    #[error("no audio samples decoded")]
    NoSamples,
    #[error("resampling failed: {0}")]
    Resample(String),
}
