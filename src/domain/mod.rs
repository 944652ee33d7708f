pub mod audio;
pub mod pipeline;
pub mod translation;
pub mod voice;
