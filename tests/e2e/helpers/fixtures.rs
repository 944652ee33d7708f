use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};
use voxbridge::domain::audio::encode_wav;

/// Voice packs laid out the way the provisioning step unpacks them
pub struct VoiceFixtures {
    root: PathBuf,
}

impl VoiceFixtures {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Broad-coverage pack: model.onnx + tokens.txt
    pub fn install_mms(&self, code: &str) -> PathBuf {
        let dir = self.root.join(format!("vits-mms-{}", code));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("model.onnx"), b"model").unwrap();
        fs::write(dir.join("tokens.txt"), b"_ 0\na 1\n").unwrap();
        dir
    }

    /// Single-speaker pack with phoneme data
    pub fn install_piper(&self, locale: &str, voice: &str) -> PathBuf {
        let dir = self.root.join(format!("vits-piper-{}-{}-medium", locale, voice));
        fs::create_dir_all(dir.join("espeak-ng-data")).unwrap();
        fs::write(dir.join(format!("{}-{}-medium.onnx", locale, voice)), b"model").unwrap();
        fs::write(dir.join("tokens.txt"), b"_ 0\na 1\n").unwrap();
        dir
    }

    /// A pack directory missing its tokens file
    pub fn install_broken(&self, code: &str) -> PathBuf {
        let dir = self.root.join(format!("vits-mms-{}", code));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("model.onnx"), b"model").unwrap();
        dir
    }
}

/// Base64 WAV of a short 440 Hz tone
pub fn wav_base64(sample_rate: u32, seconds: f32) -> String {
    let n = (sample_rate as f32 * seconds) as usize;
    let samples: Vec<f32> = (0..n)
        .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / sample_rate as f32).sin() * 0.3)
        .collect();
    BASE64.encode(encode_wav(&samples, sample_rate).unwrap())
}
