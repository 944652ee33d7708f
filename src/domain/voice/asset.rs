use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use super::error::LocateError;
use super::language;

const MODEL_EXTENSION: &str = "onnx";
const TOKENS_FILE: &str = "tokens.txt";
const PHONEME_DATA_DIR: &str = "espeak-ng-data";

/// Voice pack families, in the order they are preferred for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceFamily {
    /// High-quality single-speaker voices (`vits-piper-en_US-...`)
    Piper,
    /// Broad-coverage multilingual voices (`vits-mms-ben`)
    Mms,
}

impl VoiceFamily {
    pub const PREFERENCE: [VoiceFamily; 2] = [VoiceFamily::Piper, VoiceFamily::Mms];

    pub fn dir_prefix(&self) -> &'static str {
        match self {
            VoiceFamily::Piper => "vits-piper-",
            VoiceFamily::Mms => "vits-mms-",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "piper" => Some(VoiceFamily::Piper),
            "mms" => Some(VoiceFamily::Mms),
            _ => None,
        }
    }

    /// Whether `dir_name` is a pack of this family whose language segment is
    /// exactly `code`: `vits-piper-en`, `vits-piper-en_US-amy-low`, `vits-mms-ben`.
    fn matches(&self, dir_name: &str, code: &str) -> bool {
        language_segment(dir_name, self.dir_prefix())
            .map(|segment| !segment.is_empty() && segment.eq_ignore_ascii_case(code))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for VoiceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceFamily::Piper => write!(f, "piper"),
            VoiceFamily::Mms => write!(f, "mms"),
        }
    }
}

/// An installed, structurally valid voice pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceAsset {
    /// Canonical language the pack speaks
    pub language: String,
    pub family: VoiceFamily,
    pub dir: PathBuf,
    pub model_path: PathBuf,
    pub tokens_path: PathBuf,
    /// Phoneme data directory; only some families ship one
    pub data_dir: Option<PathBuf>,
}

/// Finds voice packs under a root directory by matching directory names.
///
/// Packs are provisioned before the service starts and are never modified
/// here, so every lookup reads the directory afresh.
#[derive(Debug, Clone)]
pub struct VoiceLocator {
    root: PathBuf,
}

impl VoiceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a voice asset for `language`.
    ///
    /// Candidate codes are the input itself followed by each alias from the
    /// language table. For every candidate, families are tried in preference
    /// order and matching directories in name order; the first structurally
    /// valid directory wins. Invalid directories are skipped, and reported
    /// only when nothing valid turns up.
    pub fn locate(&self, language: &str) -> Result<VoiceAsset, LocateError> {
        let requested = language::clean(language);
        let candidates = candidate_codes(&requested);
        let dirs = self.asset_dirs();

        let mut last_invalid: Option<LocateError> = None;

        for code in &candidates {
            for family in VoiceFamily::PREFERENCE {
                for (name, path) in dirs.iter().filter(|(name, _)| family.matches(name, code)) {
                    match inspect_dir(path) {
                        Ok((model_path, tokens_path, data_dir)) => {
                            tracing::debug!(
                                language = %requested,
                                candidate = %code,
                                family = %family,
                                dir = %name,
                                "Voice asset located"
                            );
                            return Ok(VoiceAsset {
                                language: language::normalize(code),
                                family,
                                dir: path.clone(),
                                model_path,
                                tokens_path,
                                data_dir,
                            });
                        }
                        Err(reason) => {
                            tracing::warn!(
                                dir = %name,
                                reason = %reason,
                                "Skipping invalid voice asset"
                            );
                            last_invalid = Some(LocateError::InvalidAsset {
                                path: path.clone(),
                                reason,
                            });
                        }
                    }
                }
            }
        }

        Err(last_invalid.unwrap_or(LocateError::NotFound {
            language: requested,
            tried: candidates,
        }))
    }

    /// Every valid voice asset under the root, in directory name order.
    pub fn list_installed(&self) -> Vec<VoiceAsset> {
        let name_pattern = Regex::new(r"(?i)^vits-(piper|mms)-([a-z]+)")
            .expect("static directory pattern is valid");

        self.asset_dirs()
            .into_iter()
            .filter_map(|(name, path)| {
                let captures = name_pattern.captures(&name)?;
                let family = VoiceFamily::from_tag(&captures[1].to_lowercase())?;
                let (model_path, tokens_path, data_dir) = inspect_dir(&path).ok()?;
                Some(VoiceAsset {
                    language: language::normalize(&captures[2]),
                    family,
                    dir: path,
                    model_path,
                    tokens_path,
                    data_dir,
                })
            })
            .collect()
    }

    /// Subdirectories of the root as (name, path), sorted by name.
    fn asset_dirs(&self) -> Vec<(String, PathBuf)> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    root = %self.root.display(),
                    error = %e,
                    "Voice asset root is not readable"
                );
                return Vec::new();
            }
        };

        let mut dirs: Vec<(String, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                Some((name, entry.path()))
            })
            .collect();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        dirs
    }
}

/// Text between the family prefix and the next `_` or `-`, if `dir_name`
/// starts with `prefix` (ignoring ASCII case).
fn language_segment<'a>(dir_name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = dir_name.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &dir_name[prefix.len()..];
    let end = rest.find(|c: char| c == '_' || c == '-').unwrap_or(rest.len());
    Some(&rest[..end])
}

/// The input code first, then its aliases, without duplicates.
fn candidate_codes(code: &str) -> Vec<String> {
    let mut candidates = vec![code.to_string()];
    for alias in language::aliases(code) {
        if !candidates.iter().any(|c| c == alias) {
            candidates.push(alias.to_string());
        }
    }
    candidates
}

/// Check a pack directory holds exactly one model file and a tokens file.
fn inspect_dir(dir: &Path) -> Result<(PathBuf, PathBuf, Option<PathBuf>), String> {
    let entries = fs::read_dir(dir).map_err(|e| format!("unreadable directory: {}", e))?;

    let mut models: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(MODEL_EXTENSION))
                .unwrap_or(false)
        })
        .collect();

    let model_path = match models.len() {
        0 => return Err(format!("no .{} model file", MODEL_EXTENSION)),
        1 => models.remove(0),
        n => return Err(format!("{} .{} model files, expected one", n, MODEL_EXTENSION)),
    };

    let tokens_path = dir.join(TOKENS_FILE);
    if !tokens_path.is_file() {
        return Err(format!("missing {}", TOKENS_FILE));
    }

    let data_dir = Some(dir.join(PHONEME_DATA_DIR)).filter(|path| path.is_dir());

    Ok((model_path, tokens_path, data_dir))
}
