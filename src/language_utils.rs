use anyhow::{Result, anyhow};
use isolang::Language;
use log::debug;

/// Language utilities for target-language resolution
///
/// Callers identify the target language by name ("hindi", "french", ...).
/// Glossary entries store their replacements in `target_<code>` fields, so
/// every identifier is resolved to a short code. Unknown identifiers fall back
/// to their first two characters so that glossaries can carry languages this
/// table does not know about yet.
/// Recognized language names and their ISO 639-1 codes
pub const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("english", "en"),
    ("hindi", "hi"),
    ("french", "fr"),
    ("spanish", "es"),
    ("german", "de"),
    ("russian", "ru"),
    ("chinese", "zh"),
    ("arabic", "ar"),
];

/// Prefix of the per-language target fields in glossary records
pub const TARGET_FIELD_PREFIX: &str = "target_";

/// A resolved target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    /// Short code used to select the target field (e.g. "hi")
    pub code: String,
    /// Whether the identifier was found in the lookup table
    pub recognized: bool,
}

impl TargetLanguage {
    /// Name of the glossary field holding this language's replacements
    pub fn field_name(&self) -> String {
        format!("{}{}", TARGET_FIELD_PREFIX, self.code)
    }
}

/// Resolve a language identifier to its target code
///
/// Lookup is case-insensitive. Identifiers missing from the table resolve to
/// their lowercased two-character prefix.
pub fn resolve_target_language(identifier: &str) -> TargetLanguage {
    let normalized = identifier.trim().to_lowercase();

    if let Some((_, code)) = KNOWN_LANGUAGES.iter().find(|(name, _)| *name == normalized) {
        return TargetLanguage {
            code: (*code).to_string(),
            recognized: true,
        };
    }

    let code: String = normalized.chars().take(2).collect();
    debug!(
        "Unrecognized target language '{}', falling back to code '{}'",
        identifier, code
    );

    TargetLanguage {
        code,
        recognized: false,
    }
}

/// Get the glossary target field for a language identifier (e.g. "hindi" -> "target_hi")
pub fn target_field(identifier: &str) -> String {
    resolve_target_language(identifier).field_name()
}

/// Check whether an identifier is in the lookup table
pub fn is_known_language(identifier: &str) -> bool {
    resolve_target_language(identifier).recognized
}

/// Get the English language name for an ISO 639-1 code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    Ok(lang.to_name().to_string())
}
