/// A language known to the alias table.
///
/// `code` is the canonical ISO 639-1 spelling, `aliases` every other
/// spelling seen from clients or in voice pack directory names.
struct KnownLanguage {
    code: &'static str,
    aliases: &'static [&'static str],
    name: &'static str,
}

const KNOWN_LANGUAGES: &[KnownLanguage] = &[
    KnownLanguage { code: "bn", aliases: &["ben"], name: "Bengali" },
    KnownLanguage { code: "hi", aliases: &["hin"], name: "Hindi" },
    KnownLanguage { code: "ar", aliases: &["ara", "arb"], name: "Arabic" },
    KnownLanguage { code: "ur", aliases: &["urd"], name: "Urdu" },
    KnownLanguage { code: "vi", aliases: &["vie"], name: "Vietnamese" },
    KnownLanguage { code: "tr", aliases: &["tur"], name: "Turkish" },
    KnownLanguage { code: "es", aliases: &["spa"], name: "Spanish" },
    KnownLanguage { code: "fr", aliases: &["fra"], name: "French" },
    KnownLanguage { code: "de", aliases: &["deu"], name: "German" },
    KnownLanguage { code: "en", aliases: &["eng"], name: "English" },
    KnownLanguage { code: "ja", aliases: &["jpn"], name: "Japanese" },
    KnownLanguage { code: "ko", aliases: &["kor"], name: "Korean" },
    KnownLanguage { code: "id", aliases: &["ind"], name: "Indonesian" },
    KnownLanguage { code: "ru", aliases: &["rus"], name: "Russian" },
];

/// Longest code kept after cleaning; real codes are 2 or 3 letters.
pub const MAX_CODE_LEN: usize = 16;

fn lookup(code: &str) -> Option<&'static KnownLanguage> {
    KNOWN_LANGUAGES
        .iter()
        .find(|lang| lang.code == code || lang.aliases.contains(&code))
}

/// Strip surrounding whitespace, lower-case, and unwrap the `<2xx>`
/// target-prefix form used by the text-to-text translation model. The result
/// is capped at `MAX_CODE_LEN` characters.
pub(crate) fn clean(code: &str) -> String {
    let lowered = code.trim().to_lowercase();
    let inner = match lowered
        .strip_prefix("<2")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        Some(inner) if !inner.is_empty() => inner,
        _ => lowered.as_str(),
    };
    inner.chars().take(MAX_CODE_LEN).collect()
}

/// Map any client or engine spelling of a language to its canonical code.
///
/// Known languages collapse to their 2-letter code; anything else is returned
/// lower-cased so unknown codes still flow through the pipeline.
pub fn normalize(code: &str) -> String {
    let cleaned = clean(code);
    match lookup(&cleaned) {
        Some(lang) => lang.code.to_string(),
        None => cleaned,
    }
}

/// Every other spelling of `code`'s language, in table order, excluding the
/// spelling that was passed in. Unknown codes have no aliases.
pub fn aliases(code: &str) -> Vec<&'static str> {
    let cleaned = clean(code);
    match lookup(&cleaned) {
        Some(lang) => std::iter::once(lang.code)
            .chain(lang.aliases.iter().copied())
            .filter(|alias| *alias != cleaned)
            .collect(),
        None => Vec::new(),
    }
}

/// English name of the language, used when prompting a chat model.
/// Falls back to the canonical code for unknown languages.
pub fn display_name(code: &str) -> String {
    let canonical = normalize(code);
    match lookup(&canonical) {
        Some(lang) => lang.name.to_string(),
        None => canonical,
    }
}

pub fn is_known(code: &str) -> bool {
    lookup(&clean(code)).is_some()
}
