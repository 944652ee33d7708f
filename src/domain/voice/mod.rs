pub mod asset;
pub mod cache;
pub mod error;
pub mod language;

pub use asset::{VoiceAsset, VoiceFamily, VoiceLocator};
pub use cache::EngineCache;
pub use error::{LocateError, SynthesisError, VoiceError};
